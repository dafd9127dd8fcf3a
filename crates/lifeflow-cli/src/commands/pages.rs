use crate::pages::{format_faq, format_page_lines};

pub fn run_pages() {
    for line in format_page_lines() {
        println!("{line}");
    }
}

pub fn run_faq() {
    println!("{}", format_faq());
}
