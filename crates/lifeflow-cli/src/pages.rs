//! Page list shown by `lifeflow pages`, in sidebar order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub title: &'static str,
    pub command: &'static str,
    pub requires_auth: bool,
}

const fn page(title: &'static str, command: &'static str, requires_auth: bool) -> Page {
    Page {
        title,
        command,
        requires_auth,
    }
}

pub const PAGES: [Page; 10] = [
    page("Dashboard", "dashboard", true),
    page("Todo List", "tasks", true),
    page("Expenses", "expenses", true),
    page("Habits", "habits", true),
    page("Study Timer", "timer", false),
    page("My Notes", "notes", true),
    page("Countdown", "countdown", false),
    page("Bookmarks", "bookmarks", true),
    page("App FAQ", "faq", false),
    page("Profile", "profile", true),
];

pub const FAQ: [(&str, &str); 5] = [
    (
        "What is LifeFlow?",
        "LifeFlow is your personal life management companion designed specifically for medical students. It helps you track tasks, expenses, habits, study time, and more - all in one place.",
    ),
    (
        "How does the Pomodoro Timer work?",
        "The Pomodoro Technique is a time management method. Work for 25 minutes, then take a 5-minute break. After 4 sessions, take a longer break. This helps maintain focus and prevent burnout during study sessions.",
    ),
    (
        "Is my data saved securely?",
        "Yes! All your data is stored securely in the cloud and is only accessible by you. We use industry-standard encryption and authentication to protect your information.",
    ),
    (
        "Can I use LifeFlow on multiple devices?",
        "Absolutely! Since your data is stored in the cloud, you can access LifeFlow from any device by simply logging into your account. All your tasks, notes, and progress will sync automatically.",
    ),
    (
        "How do I reset my exam countdown date?",
        "Run `lifeflow countdown set YYYY-MM-DD` with your new exam date. The countdown updates to show the time remaining until your exam.",
    ),
];

pub fn format_page_lines() -> Vec<String> {
    PAGES
        .iter()
        .map(|page| {
            let gate = if page.requires_auth { "  (sign-in required)" } else { "" };
            format!("{:<12} lifeflow {}{gate}", page.title, page.command)
        })
        .collect()
}

pub fn format_faq() -> String {
    FAQ.iter()
        .map(|(question, answer)| format!("Q: {question}\nA: {answer}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
