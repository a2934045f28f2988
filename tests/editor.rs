use inkpad::analyze::{Analyzer, Lint, Score};
use inkpad::bind::Bindings;
use inkpad::editor::{Action, Editor};
use inkpad::error::Result;
use inkpad::ex::Font;
use inkpad::key::{self, BACKSPACE, CTRL_A, CTRL_R, ENTER, ESC, Key};
use inkpad::mode::Mode;
use inkpad::render::Renderer;
use inkpad::state::Field;
use inkpad::storage::{DocsStorage, MemoryStorage};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

const LEFT: Key = Key::Left;

fn k(text: &str) -> Vec<Key> {
    key::keys(text)
}

fn editor() -> Editor {
    Editor::new(Box::new(MemoryStorage::new()))
}

fn run(keys: &[Vec<Key>]) -> Editor {
    let mut ed = editor();
    ed.send(&keys.concat());
    ed
}

fn first_line(ed: &Editor) -> String {
    ed.buffer().to_strings().remove(0)
}

#[test]
fn insertion() {
    let ed = run(&[k("if")]);
    assert_eq!(first_line(&ed), "f");
}

#[test]
fn left() {
    let mut ed = run(&[k("if")]);
    ed.send(&[vec![LEFT], k("g")].concat());
    assert_eq!(first_line(&ed), "gf");
    ed.send(&[vec![ESC, LEFT], k("ih")].concat());
    assert_eq!(first_line(&ed), "hgf");
}

#[test]
fn right() {
    let mut ed = run(&[k("i2")]);
    ed.send(&[vec![LEFT], k("1"), vec![Key::Right], k("3")].concat());
    assert_eq!(first_line(&ed), "123");
    ed.send(&[vec![ESC, CTRL_A, Key::Right], k("i.")].concat());
    assert_eq!(first_line(&ed), ".123");
}

#[test]
fn up() {
    let mut ed = run(&[k("i1"), vec![ENTER], k("2")]);
    assert_eq!(ed.buffer().to_strings(), vec!["1", "2"]);
    ed.send(&[vec![Key::Up], k("3")].concat());
    assert_eq!(first_line(&ed), "13");
    ed.send(&[vec![ENTER], k("4"), vec![ESC, Key::Up]].concat());
    assert_eq!(ed.mode(), Mode::Normal);
    ed.send(&k("i5"));
    assert_eq!(first_line(&ed), "513");
}

#[test]
fn line_break() {
    let ed = run(&[k("i12"), vec![LEFT, ENTER]]);
    assert_eq!(ed.buffer().to_strings(), vec!["1", "2"]);
}

#[test]
fn indentation_carried() {
    let ed = run(&[k("i  b"), vec![ENTER], k("a")]);
    assert_eq!(ed.buffer().to_strings(), vec!["  b", "  a"]);
}

#[test]
fn enter_at_every_column() {
    let text = "naïve café";
    for lefts in 0..=text.chars().count() {
        let ed = run(&[k("i"), k(text), vec![LEFT; lefts], vec![ENTER]]);
        let lines = ed.buffer().to_strings();
        assert_eq!(lines.concat(), text, "{lefts}");
        assert_eq!(lines[1].chars().count(), lefts, "{lefts}");
        assert_eq!(ed.cursor(), (1, 0), "{lefts}");
    }
}

#[test]
fn backspace_joins_then_enter_splits() {
    for (first, second) in [("one", "two"), ("naïve", "café"), ("x", "")] {
        let mut ed = run(&[k("i"), k(first), vec![ENTER], k(second), vec![CTRL_A, BACKSPACE]]);
        assert_eq!(ed.buffer().to_strings(), vec![format!("{first}{second}")]);
        assert_eq!(ed.cursor(), (0, first.chars().count()));
        ed.send(&[ENTER]);
        assert_eq!(ed.buffer().to_strings(), vec![first, second]);
    }
}

#[test]
fn deletion() {
    let ed = run(&[k("i123"), vec![BACKSPACE]]);
    assert_eq!(first_line(&ed), "12");
}

#[test]
fn deletion_joins_lines() {
    let ed = run(&[k("i123"), vec![ESC], k("o456"), vec![CTRL_A, BACKSPACE]]);
    assert_eq!(ed.buffer().to_strings(), vec!["123456"]);
}

#[test]
fn delete_line() {
    let ed = run(&[k("i123"), vec![ESC], k("ddi1")]);
    assert_eq!(ed.buffer().to_strings(), vec!["1"]);

    let ed = run(&[k("i123"), vec![ENTER], k("456"), vec![Key::Up, ESC], k("dd")]);
    assert_eq!(ed.buffer().to_strings(), vec!["456"]);
    assert_eq!(ed.register(), "123\n");
}

fn word_case(text: &str, lefts: usize) -> Vec<Key> {
    [k("i"), k(text), vec![LEFT; lefts], vec![ESC]].concat()
}

#[test]
fn delete_around_word() {
    for (text, lefts, deleted, yanked) in [
        ("a word", 0, "a", " word"),
        ("a word ", 2, "a ", "word "),
        ("a wo ", 4, "wo ", "a "),
    ] {
        let ed = run(&[word_case(text, lefts), k("daw")]);
        assert_eq!(first_line(&ed), deleted, "{text}");
        assert_eq!(ed.register(), yanked, "{text}");
    }
}

#[test]
fn delete_inside_word() {
    for (text, lefts, deleted, yanked) in [
        ("a word", 0, "a ", "word"),
        ("a word ", 2, "a  ", "word"),
        ("a wo ", 4, " wo ", "a"),
    ] {
        let ed = run(&[word_case(text, lefts), k("diw")]);
        assert_eq!(first_line(&ed), deleted, "{text}");
        assert_eq!(ed.register(), yanked, "{text}");
    }
}

#[test]
fn change_around_word() {
    for (text, lefts, changed) in [
        ("da word", 0, "dafoo"),
        ("da word ", 3, "da foo"),
        ("da wo ", 4, "foowo "),
    ] {
        let ed = run(&[word_case(text, lefts), k("cawfoo")]);
        assert_eq!(first_line(&ed), changed, "{text}");
        assert_eq!(ed.mode(), Mode::Insert);
    }
}

#[test]
fn change_inside_word() {
    for (text, lefts, changed) in [
        ("da word", 0, "da foo"),
        ("da word ", 3, "da foo "),
        ("da wo ", 4, "foo wo "),
    ] {
        let ed = run(&[word_case(text, lefts), k("ciwfoo")]);
        assert_eq!(first_line(&ed), changed, "{text}");
    }
}

#[test]
fn change_to_end() {
    let ed = run(&[k("ione two"), vec![LEFT, LEFT, LEFT, LEFT, ESC], k("c$x")]);
    assert_eq!(first_line(&ed), "onx");
    assert_eq!(ed.register(), "e two");
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn delete_to_end_starts_at_caret() {
    let ed = run(&[k("iabc"), vec![ESC], k("d$")]);
    assert_eq!(first_line(&ed), "ab");
    assert_eq!(ed.register(), "c");
    assert_eq!(ed.cursor(), (0, 2));

    let ed = run(&[k("iabc"), vec![ESC, CTRL_A], k("d$")]);
    assert_eq!(first_line(&ed), "");
    assert_eq!(ed.register(), "abc");
}

#[test]
fn paste_after_delete() {
    let ed = run(&[k("ihello"), vec![ESC], k("dawa"), vec![ENTER, ESC], k("p")]);
    assert_eq!(ed.buffer().line(1).map(|l| l.to_string()), Some("hello".into()));
}

#[test]
fn basic_paste() {
    let ed = run(&[k("ia word"), vec![ESC], k("diwa"), vec![ENTER, ESC], k("p")]);
    assert_eq!(ed.buffer().line(1).map(|l| l.to_string()), Some("word".into()));
    assert_eq!(ed.mode(), Mode::Normal);
}

#[test]
fn paste_before() {
    let ed = run(&[k("iab"), vec![ESC], k("dd"), k("P")]);
    assert_eq!(ed.buffer().to_strings(), vec!["ab", ""]);
}

fn counting() -> Vec<Key> {
    [
        k("i1 "),
        vec![ESC],
        k("A2 "),
        vec![ESC],
        k("A3 "),
        vec![ESC],
    ]
    .concat()
}

#[test]
fn basic_undo() {
    let ed = run(&[counting(), k("uA4")]);
    assert_eq!(first_line(&ed), "1 2 4");
}

#[test]
fn branch_undo() {
    let ed = run(&[counting(), k("uuA4 "), vec![ESC], k("A5")]);
    assert_eq!(first_line(&ed), "1 4 5");
}

#[test]
fn redo() {
    let ed = run(&[counting(), k("uu"), vec![CTRL_R]]);
    assert_eq!(first_line(&ed), "1 2 ");
}

#[test]
fn redo_and_undo() {
    let ed = run(&[counting(), k("uu"), vec![CTRL_R], k("A4"), vec![ESC], k("u")]);
    assert_eq!(first_line(&ed), "1 2 ");
}

#[test]
fn undo_with_depth() {
    let mut ed = editor().with_undo_depth(2);
    ed.send(&[counting(), k("uA4")].concat());
    assert_eq!(first_line(&ed), "1 2 4");
}

#[test]
fn redo_and_undo_with_depth() {
    let mut ed = editor().with_undo_depth(2);
    ed.send(&[counting(), k("uu"), vec![CTRL_R], k("A4"), vec![ESC], k("u")].concat());
    assert_eq!(first_line(&ed), "1 2 3 ");
    assert!(ed.history().len() <= 2);
}

#[test]
fn history_limits() {
    let ed = run(&[vec![CTRL_R, CTRL_R]]);
    assert_eq!(ed.status(), Some("No further redo information"));
    let ed = run(&[k("uuuu")]);
    assert_eq!(ed.status(), Some("No further undo information"));
    assert_eq!(ed.buffer().to_strings(), vec![""]);
}

#[test]
fn movement_while_pending() {
    let mut ed = run(&[k("ione"), vec![ENTER], k("two"), vec![ESC], k("d")]);
    ed.dispatch(LEFT);
    assert_eq!(ed.command(), "d");
    assert!(ed.status().is_some());
    ed.send(&k("d"));
    assert_eq!(ed.buffer().to_strings(), vec!["one"]);
    assert!(ed.status().is_none());
}

#[test]
fn custom_bindings() {
    let bindings = Bindings::with_overrides([("x:x", "delete-line")]).unwrap();
    let mut ed = editor().with_bindings(bindings);
    ed.send(&[k("ione"), vec![ENTER], k("two"), vec![ESC], k("xx")].concat());
    assert_eq!(ed.buffer().to_strings(), vec!["one"]);
}

#[test]
fn save_to_docs() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DocsStorage::open(dir.path()).unwrap();
    let mut ed = Editor::new(Box::new(storage));
    ed.send(&[k("itext"), vec![ESC], k(":w foo\n")].concat());
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(fs::read_to_string(dir.path().join("foo")).unwrap(), "text");
    assert_eq!(ed.filename(), "foo");
    assert!(ed.saved());
    assert_eq!(ed.status(), Some("Saved as foo"));

    ed.send(&[k("A more"), vec![ESC], k(":w\n")].concat());
    assert_eq!(fs::read_to_string(dir.path().join("foo")).unwrap(), "text more");
}

#[test]
fn save_and_load() {
    let mut ed = editor();
    ed.send(&[k("itext\nmore"), vec![ESC], k(":w foo\n")].concat());
    ed.send(&[k("ddx"), k(":e! foo\n")].concat());
    assert_eq!(ed.buffer().to_strings(), vec!["text", "more"]);
    assert_eq!(ed.cursor(), (0, 0));
    assert_eq!(ed.status(), Some("Loaded foo"));
    assert_eq!(ed.history().len(), 1);
}

#[test]
fn load_guards_unsaved_changes() {
    let storage = MemoryStorage::new().with_doc("notes", "# Notes\nfirst");
    let mut ed = Editor::new(Box::new(storage));
    ed.send(&[k("ihi"), vec![ESC], k(":e notes\n")].concat());
    assert_eq!(ed.status(), Some("You have unsaved changes"));
    assert_eq!(ed.buffer().to_strings(), vec!["hi"]);
    assert!(ed.pending().is_empty());

    ed.send(&k(":e! notes\n"));
    assert_eq!(ed.buffer().to_strings(), vec!["# Notes", "first"]);
    assert_eq!(ed.filename(), "notes");
    assert!(ed.saved());
}

#[test]
fn load_failure_recorded() {
    let mut ed = editor();
    ed.send(&k(":e missing\n"));
    assert!(ed.err().is_some());
    assert_eq!(ed.filename(), "unnamed");
    ed.send(&k(":w\n"));
    assert!(ed.err().is_none());
}

#[test]
fn open_at_startup() {
    let storage = MemoryStorage::new().with_doc("draft", "one\ntwo");
    let mut ed = Editor::new(Box::new(storage));
    ed.open("draft");
    assert_eq!(ed.filename(), "draft");
    assert_eq!(ed.buffer().to_strings(), vec!["one", "two"]);
}

#[test]
fn completion_cycles() {
    let storage = MemoryStorage::new()
        .with_doc("draft-1", "first")
        .with_doc("draft-2", "second")
        .with_doc("notes", "");
    let mut ed = Editor::new(Box::new(storage));
    ed.send(&[k(":e dr"), vec![key::TAB]].concat());
    let (names, selected) = ed.completions().unwrap();
    assert_eq!(names, ["draft-1", "draft-2"]);
    assert_eq!(selected, None);
    assert_eq!(ed.command(), ":e dr");

    ed.send(&[key::TAB, key::TAB]);
    assert_eq!(ed.completions().unwrap().1, Some(1));
    ed.send(&[key::TAB]);
    assert_eq!(ed.completions().unwrap().1, Some(0));
    let markup = ed.field_value(Field::Completions);
    assert!(markup[0].as_str().unwrap().contains("highlight"));

    ed.send(&[ENTER]);
    assert_eq!(ed.filename(), "draft-1");
    assert_eq!(ed.buffer().to_strings(), vec!["first"]);
    assert!(ed.completions().is_none());
}

#[test]
fn completion_unique_and_reset() {
    let storage = MemoryStorage::new().with_doc("notes", "n");
    let mut ed = Editor::new(Box::new(storage));
    ed.send(&[k(":e n"), vec![key::TAB], k("o")].concat());
    assert!(ed.completions().is_none());
    ed.send(&[key::TAB, ENTER]);
    assert_eq!(ed.filename(), "notes");
}

#[test]
fn quit_requests_power_off() {
    let mut ed = editor();
    assert_eq!(ed.send(&k(":q\n")), Some(Action::PowerOff));
    assert_eq!(ed.status(), Some("Shutting down"));

    let mut ed = run(&[k("ix"), vec![ESC]]);
    assert_eq!(ed.send(&k(":q\n")), None);
    assert_eq!(ed.status(), Some("You have unsaved changes"));
    assert_eq!(ed.send(&k(":q!\n")), Some(Action::PowerOff));
}

#[test]
fn quit_from_help_guards_unsaved_document() {
    let mut ed = run(&[k("idraft"), vec![ESC], k(":h\n")]);
    assert!(ed.is_help());
    assert_eq!(ed.send(&k(":q\n")), None);
    assert_eq!(ed.status(), Some("You have unsaved changes"));
    assert_eq!(ed.send(&k(":q!\n")), Some(Action::PowerOff));

    let mut ed = run(&[k("idraft"), vec![ESC], k(":w draft\n:h\n")]);
    assert_eq!(ed.send(&k(":q\n")), Some(Action::PowerOff));
}

#[test]
fn help_round_trip() {
    let mut ed = run(&[k("ihi"), vec![ESC], k(":h\n")]);
    assert!(ed.is_help());
    assert_eq!(ed.filename(), "help");
    assert!(ed.saved());
    assert!(ed.buffer().to_strings().iter().any(|line| line == "## Bindings"));
    assert_eq!(ed.status(), Some("Press q to return"));

    ed.send(&k("q"));
    assert!(!ed.is_help());
    assert_eq!(ed.filename(), "unnamed");
    assert_eq!(ed.buffer().to_strings(), vec!["hi"]);
    assert!(!ed.saved());
}

#[test]
fn display_settings() {
    let mut ed = editor();
    ed.send(&k(":mono\n"));
    assert_eq!(ed.font(), Font::Mono);
    ed.send(&k(":fs 30\n"));
    assert_eq!(ed.font_size(), 30);
    assert_eq!(ed.status(), Some("Set font size to 30"));
    ed.send(&k(":fontsize big\n"));
    assert_eq!(ed.font_size(), 30);
    assert!(ed.status().is_some());
    ed.send(&k(":rot\n"));
    assert!(ed.rotated());
    assert_eq!(ed.field_value(Field::Rot), json!("90"));
    ed.send(&k(":viz 4:1\n"));
    assert_eq!(ed.viz(), Some((4, 1)));
    ed.send(&k(":viz\n"));
    assert_eq!(ed.viz(), None);
    assert_eq!(ed.status(), Some("Clearing custom viz"));
}

#[test]
fn oversized_font_size_rejected() {
    let mut ed = editor();
    ed.send(&k(":fs 3000000000\n"));
    assert_eq!(ed.font_size(), 50);
    assert!(ed.status().is_some());
    assert_eq!(ed.get().len(), 1);

    let ed = editor().with_display(Font::Serif, u32::MAX, false);
    assert_eq!(ed.get().len(), 1);
}

#[test]
fn unknown_command_discarded() {
    let mut ed = editor();
    ed.take_changes();
    ed.send(&k(":bogus\n"));
    assert!(ed.pending().is_empty());
    assert!(ed.status().is_none());
    assert!(!ed.changes().contains(Field::Status));
}

#[test]
fn viewport_window() {
    let mut ed = run(&[k("i1\n2\n3\n4\n5"), vec![ESC], k(":viz 2:1\n")]);
    let lines = ed.get();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('4'));
    assert!(lines[1].contains(r#"<span id="caret" class="normal"> </span>5"#));
    ed.send(&k(":viz\n"));
    assert_eq!(ed.get().len(), 5);
}

#[test]
fn word_count() {
    let ed = run(&[k("i# Title\n\nbody text"), vec![ESC], k(":wc\n")]);
    assert_eq!(ed.status(), Some("6 words, 2 paragraphs"));
}

#[test]
fn analyzer_unavailable() {
    let ed = run(&[k(":lint\n")]);
    assert_eq!(ed.status(), Some("analyzer: linting not available"));
    assert!(ed.modal().is_none());
}

struct FixedAnalyzer;

impl Analyzer for FixedAnalyzer {
    fn lint(&self, _: &str) -> Result<Vec<Lint>> {
        Ok(vec![Lint {
            line: 0,
            column: 2,
            message: "weasel word".to_string(),
        }])
    }

    fn readability(&self, _: &str) -> Result<Vec<Score>> {
        Ok(vec![Score {
            name: "flesch".to_string(),
            value: 70.0,
        }])
    }
}

#[derive(Default)]
struct RecordingAnalyzer {
    texts: Rc<RefCell<Vec<String>>>,
}

impl Analyzer for RecordingAnalyzer {
    fn lint(&self, text: &str) -> Result<Vec<Lint>> {
        self.texts.borrow_mut().push(text.to_string());
        Ok(Vec::new())
    }

    fn readability(&self, text: &str) -> Result<Vec<Score>> {
        self.texts.borrow_mut().push(text.to_string());
        Ok(Vec::new())
    }
}

#[test]
fn analyzer_sees_stripped_text() {
    let analyzer = RecordingAnalyzer::default();
    let texts = Rc::clone(&analyzer.texts);
    let mut ed = editor().with_analyzer(Box::new(analyzer));
    ed.send(&[k("i# Title\n**bold** _it_"), vec![ESC], k(":lint\n")].concat());
    assert_eq!(ed.status(), Some("No lint found"));
    ed.send(&k(":rs\n"));
    assert_eq!(*texts.borrow(), vec!["  Title   bold    it "; 2]);
}

struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, lines: &[String], _: Option<usize>) -> Vec<String> {
        lines.to_vec()
    }
}

#[test]
fn custom_renderer() {
    let mut ed = editor().with_renderer(Box::new(PlainRenderer));
    ed.send(&[k("i# a"), vec![ESC]].concat());
    assert_eq!(ed.get(), vec![r#"#<span id="caret" class="normal"> </span>a"#]);
}

#[test]
fn analyzer_results_shown_as_modal() {
    let mut ed = editor().with_analyzer(Box::new(FixedAnalyzer));
    ed.send(&k(":lint\n"));
    assert_eq!(ed.modal(), Some(&["1:3: weasel word".to_string()][..]));

    ed.send(&k("i"));
    assert!(ed.modal().is_none());
    assert_eq!(ed.mode(), Mode::Normal);

    ed.send(&k(":rs\n"));
    assert_eq!(ed.modal(), Some(&["flesch: 70.0".to_string()][..]));
}

#[test]
fn published_events() {
    let mut ed = editor();
    ed.events();
    ed.send(&k(":fs 30\n"));
    let events = ed.events();
    let fontsize = events
        .iter()
        .find(|e| e.event == Field::Fontsize)
        .map(|e| e.data.clone());
    assert_eq!(fontsize, Some(json!(30)));
    assert!(events.iter().any(|e| e.event == Field::Buffer));
    assert!(!events.iter().any(|e| e.event == Field::Font));
}
