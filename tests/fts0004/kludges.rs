//! AREA, SEEN-BY and control lines

use fidopkt::kludge::{LineKind, classify_line};
use fidopkt::{extract_kludges, seen_by_lines, strip_kludges};

const ECHOMAIL: &str = "AREA:R50.SYSOP\n\
\u{1}MSGID: 2:5020/1042 65e71a2b\n\
\u{1}REPLY: 2:5020/1 65e70000\n\
\u{1}PID: GoldED+/LNX 1.1.5\n\
\u{1}CHRS: CP866 2\n\
Hello All!\n\
\n\
Test message.\n\
--- GoldED+/LNX 1.1.5\n \
* Origin: Test Station (2:5020/1042)\n\
SEEN-BY: 5020/1 1042\n\
SEEN-BY: 5030/1\n\
\u{1}PATH: 5020/1042\n";

#[test]
fn test_area_and_seen_by_extraction() {
    let text = "AREA:TEST\nSEEN-BY: 1/2\nhello\nworld\n";

    let kludges = extract_kludges(text);
    assert_eq!(kludges.len(), 2);
    assert_eq!(kludges.get("AREA").map(String::as_str), Some("TEST"));
    assert_eq!(kludges.get("SEEN-BY").map(String::as_str), Some(" 1/2"));

    assert_eq!(strip_kludges(text), "hello\nworld\n");
}

#[test]
fn test_echomail_kludges() {
    let kludges = extract_kludges(ECHOMAIL);

    assert_eq!(kludges["AREA"], "R50.SYSOP");
    assert_eq!(kludges["MSGID"], "2:5020/1042 65e71a2b");
    assert_eq!(kludges["REPLY"], "2:5020/1 65e70000");
    assert_eq!(kludges["PID"], "GoldED+/LNX 1.1.5");
    assert_eq!(kludges["CHRS"], "CP866 2");
    assert_eq!(kludges["PATH"], "5020/1042");
    assert_eq!(kludges["SEEN-BY"], " 5030/1");
    assert_eq!(kludges.len(), 7);
}

#[test]
fn test_echomail_body() {
    assert_eq!(
        strip_kludges(ECHOMAIL),
        "Hello All!\n\nTest message.\n--- GoldED+/LNX 1.1.5\n * Origin: Test Station (2:5020/1042)\n"
    );
}

#[test]
fn test_all_seen_by_lines() {
    assert_eq!(seen_by_lines(ECHOMAIL), vec![" 5020/1 1042", " 5030/1"]);
}

#[test]
fn test_area_later_in_text_is_body() {
    let text = "Hi\nAREA:NOT.AN.AREA\n";
    assert!(extract_kludges(text).is_empty());
    assert_eq!(strip_kludges(text), text);
}

#[test]
fn test_keys_are_case_sensitive() {
    let kludges = extract_kludges("\u{1}MSGID: a\n\u{1}msgid: b\n");
    assert_eq!(kludges["MSGID"], "a");
    assert_eq!(kludges["msgid"], "b");
}

#[test]
fn test_control_line_without_value_is_stripped() {
    let text = "\u{1}EMPTY\nbody\n";
    assert!(extract_kludges(text).is_empty());
    assert_eq!(strip_kludges(text), "body\n");
}

#[test]
fn test_classification_is_shared() {
    let text = "AREA:X\n\u{1}A: 1\nSEEN-BY: 1/1\nplain\n";
    let kinds: Vec<bool> = text
        .split_terminator('\n')
        .enumerate()
        .map(|(i, line)| classify_line(i, line).is_kludge())
        .collect();
    assert_eq!(kinds, vec![true, true, true, false]);
    assert_eq!(extract_kludges(text).len(), 3);
    assert_eq!(strip_kludges(text), "plain\n");
}

#[test]
fn test_line_kinds() {
    assert_eq!(classify_line(0, "AREA:X"), LineKind::Area("X"));
    assert_eq!(classify_line(5, "SEEN-BY:"), LineKind::SeenBy(""));
    assert_eq!(classify_line(0, "plain"), LineKind::Body);
}
