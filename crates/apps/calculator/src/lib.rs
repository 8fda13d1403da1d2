//! Calculator mini-app: a four-function engine behind the [`AppHost`] capability interface.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod engine;

use desktop_app_contract::{AppContext, AppHost, AppInput};
use engine::{keyboard_action, BinaryOp, CalculatorState};

const BUTTON_ROWS: [[(&str, &str); 4]; 4] = [
    [("C", "calc-clear"), ("/", "calc-op"), ("*", "calc-op"), ("back", "calc-op")],
    [("7", ""), ("8", ""), ("9", ""), ("-", "calc-op")],
    [("4", ""), ("5", ""), ("6", ""), ("+", "calc-op")],
    [("1", ""), ("2", ""), ("3", ""), ("=", "calc-equals")],
];

/// Calculator window host.
#[derive(Debug, Default)]
pub struct CalculatorApp {
    state: CalculatorState,
}

impl CalculatorApp {
    /// Creates a calculator showing `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display text (`Error` after a failed operation).
    pub fn display(&self) -> &str {
        self.state.display_text()
    }
}

impl AppHost for CalculatorApp {
    fn mount(&mut self, _ctx: &mut AppContext) {}

    fn handle_input(&mut self, input: AppInput, _ctx: &mut AppContext) {
        let key = match &input {
            AppInput::Key(key) | AppInput::Button(key) => key.as_str(),
            _ => return,
        };
        if let Some(action) = keyboard_action(key) {
            self.state.apply(action);
        }
    }

    fn render(&self) -> String {
        let mut html = format!(
            r#"<div class="calculator-app"><div class="calc-display">{}</div><div class="calc-buttons">"#,
            self.state.display_text()
        );
        for row in BUTTON_ROWS {
            for (key, class) in row {
                html.push_str(&button(key, class));
            }
        }
        html.push_str(&button("0", "calc-zero"));
        html.push_str(&button(".", ""));
        html.push_str("</div>");
        if let Some(op) = self.state.pending_op() {
            html.push_str(&format!(r#"<div class="calc-pending">{}</div>"#, op_label(op)));
        }
        html.push_str("</div>");
        html
    }
}

fn button(key: &str, class: &str) -> String {
    let label = match key {
        "/" => "÷",
        "*" => "×",
        "-" => "−",
        "back" => "⌫",
        other => other,
    };
    format!(r#"<button class="calc-btn {class}" data-app-button="{key}">{label}</button>"#)
}

fn op_label(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "−",
        BinaryOp::Multiply => "×",
        BinaryOp::Divide => "÷",
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::WindowId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn feed(app: &mut CalculatorApp, inputs: &[AppInput]) {
        let mut ctx = AppContext::new(WindowId::trusted("calculator"));
        for input in inputs {
            app.handle_input(input.clone(), &mut ctx);
        }
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn buttons_and_keys_drive_the_same_engine() {
        let mut app = CalculatorApp::new();
        feed(
            &mut app,
            &[
                AppInput::Button("7".into()),
                AppInput::Key("+".into()),
                AppInput::Button("3".into()),
                AppInput::Key("Enter".into()),
            ],
        );
        assert_eq!(app.display(), "10");
        assert!(app.render().contains(r#"<div class="calc-display">10</div>"#));
    }

    #[test]
    fn render_shows_error_after_divide_by_zero() {
        let mut app = CalculatorApp::new();
        feed(
            &mut app,
            &[
                AppInput::Key("1".into()),
                AppInput::Key("/".into()),
                AppInput::Key("0".into()),
                AppInput::Key("=".into()),
            ],
        );
        assert!(app.render().contains(">Error<"));
    }

    #[test]
    fn render_lists_every_button_once() {
        let html = CalculatorApp::new().render();
        assert_eq!(html.matches("data-app-button=").count(), 18);
        assert!(!html.contains("calc-pending"));
    }

    #[test]
    fn ticks_and_text_are_ignored() {
        let mut app = CalculatorApp::new();
        feed(&mut app, &[AppInput::Tick, AppInput::Text("42".into())]);
        assert_eq!(app.display(), "0");
    }
}
