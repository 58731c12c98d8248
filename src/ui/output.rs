use crate::shortcut::Pin;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

pub fn phase(name: &str) {
    println!();
    println!(
        "{} {}",
        Icons::GEAR.style(theme().info.clone()),
        name.style(theme().header.clone())
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// `[k]` for shortcut pins, `[pin]` for plain ones
pub fn pin_label(pin: Pin) -> String {
    match pin {
        Pin::Shortcut(key) => format!("[{}]", key).style(theme().shortcut.clone()).to_string(),
        Pin::Plain => muted("[pin]"),
        Pin::Unpinned => muted("[-]"),
    }
}

pub fn entry_inserted(id: i64, pin: Pin, preview: &str) {
    println!(
        "{} {} {} {}",
        Icons::NEW.style(theme().success.clone()),
        pin_label(pin),
        preview,
        muted(&format!("#{}", id))
    );
}

pub fn entry_duplicate(preview: &str) {
    println!("{} {}", Icons::SKIP, muted(preview));
}

pub fn item_recovered(id: i64, title: &str) {
    println!(
        "{} {} {}",
        Icons::WRENCH.style(theme().success.clone()),
        title,
        muted(&format!("#{}", id))
    );
}

pub fn item_broken(id: i64, title: &str) {
    println!(
        "{} {} {}",
        Icons::CROSS.style(theme().error.clone()),
        if title.is_empty() { "(no title)" } else { title },
        muted(&format!("#{}", id))
    );
}

pub fn shortcut_cleared(key: char, title: &str) {
    println!(
        "{} {} {}",
        Icons::DEL.style(theme().warn.clone()),
        format!("[{}]", key).style(theme().shortcut.clone()),
        title
    );
}
