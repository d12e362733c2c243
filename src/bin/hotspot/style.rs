//! Terminal styling utilities

use colored::Colorize;

pub fn style_green(s: &str) -> String {
    s.green().to_string()
}

pub fn style_red(s: &str) -> String {
    s.red().to_string()
}

pub fn style_yellow(s: &str) -> String {
    s.yellow().to_string()
}

pub fn style_dim(s: &str) -> String {
    s.dimmed().to_string()
}

pub fn style_bold(s: &str) -> String {
    s.bold().to_string()
}

pub fn style_bold_green(s: &str) -> String {
    s.green().bold().to_string()
}

pub fn style_bold_yellow(s: &str) -> String {
    s.yellow().bold().to_string()
}

pub fn style_bold_red(s: &str) -> String {
    s.red().bold().to_string()
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", style_red("✗"), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", style_yellow("⚠"), msg);
}
