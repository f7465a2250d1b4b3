use std::fmt::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn appends_in_order() {
    let mut buf = StringBuilder::new();
    buf.push_str("int");
    buf.push('*');
    buf.push_str("[]");
    assert_eq!(buf.as_str(), "int*[]");
    assert_eq!(buf.len(), 6);
}

#[test]
fn indent_writes_spaces() {
    let mut buf = StringBuilder::new();
    buf.indent(3);
    buf.push('x');
    buf.indent(0);
    assert_eq!(buf.as_str(), "   x");
}

#[test]
fn colors_off_by_default() {
    let mut buf = StringBuilder::new();
    buf.push_colored(Color::Cyan, "resolved to:");
    assert!(!buf.uses_colors());
    assert_eq!(buf.as_str(), "resolved to:");
}

#[test]
fn colors_wrap_text_when_enabled() {
    let mut buf = StringBuilder::with_color_mode(ColorMode::Always, false);
    buf.push_colored(Color::Blue, "size:");
    assert_eq!(buf.as_str(), "\x1b[34msize:\x1b[0m");
}

#[test]
fn auto_mode_without_tty_is_plain() {
    let mut buf = StringBuilder::with_color_mode(ColorMode::Auto, false);
    buf.push_colored(Color::Green, "x");
    assert_eq!(buf.as_str(), "x");
}

#[test]
fn supports_write_macro() {
    let mut buf = StringBuilder::new();
    let _ = write!(buf, "{}[{}]", "u8", 16);
    assert_eq!(buf.to_string(), "u8[16]");
}

#[test]
fn clear_keeps_color_setting() {
    let mut buf = StringBuilder::with_color_mode(ColorMode::Always, false);
    buf.push_str("abc");
    buf.clear();
    assert!(buf.is_empty());
    assert!(buf.uses_colors());
    assert_eq!(buf.into_string(), "");
}
