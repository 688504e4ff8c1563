use colored::Colorize;
use shortener_core::{AppViewModel, AuthMode, Button, Link};

/// Renders the view model as terminal lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![String::new(), "Link Shortener".bold().to_string()];

    match &view.username {
        Some(username) => render_signed_in(view, username, &mut lines),
        None => render_form(view, &mut lines),
    }

    if view.busy {
        lines.push("waiting for server...".dimmed().to_string());
    }
    if let Some(error) = &view.error {
        lines.push(error.red().to_string());
    }
    if let Some(message) = &view.message {
        lines.push(message.green().to_string());
    }

    if view.username.is_some() {
        render_links(&view.links, &mut lines);
    }
    lines
}

fn render_signed_in(view: &AppViewModel, username: &str, lines: &mut Vec<String>) {
    lines.push(format!(
        "Welcome , {}    {}",
        username.magenta().bold(),
        button_label(view, Button::Logout, "Log Out")
    ));
    lines.push(format!(
        "Long Url: {}    {}",
        view.url_input,
        button_label(view, Button::Shorten, "Shorten")
    ));
}

fn render_form(view: &AppViewModel, lines: &mut Vec<String>) {
    let (title, button, label, switch_hint) = match view.mode {
        AuthMode::Login => (
            "Login",
            Button::Login,
            "Login",
            "Don't you have an account? Sign Up (`signup`)",
        ),
        AuthMode::Register => (
            "Sign Up",
            Button::Register,
            "Sign Up",
            "Do you already have an account? Login (`signin`)",
        ),
    };
    lines.push(title.bold().to_string());
    lines.push(format!("Username: {}", view.username_input));
    lines.push(format!(
        "Password: {}    {}",
        "*".repeat(view.password_len),
        button_label(view, button, label)
    ));
    lines.push(switch_hint.dimmed().to_string());
}

fn render_links(links: &[Link], lines: &mut Vec<String>) {
    if links.is_empty() {
        lines.push("No shortened links yet.".dimmed().to_string());
        return;
    }
    for link in links {
        lines.push(format!("- {}", link.short_url.magenta().bold()));
        lines.push(format!("    Original URL: {}", link.original_url));
        lines.push(format!("    Number of Clicks: {}", link.click_count));
    }
}

fn button_label(view: &AppViewModel, button: Button, text: &str) -> String {
    let label = format!("[{text}]");
    if view.hovered == Some(button) {
        label.reversed().to_string()
    } else {
        label.bold().to_string()
    }
}
