const MAX_ENTRY_DIGITS: usize = 16;
const ERROR_TEXT: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CalcAction {
    Digit(char),
    Decimal,
    Backspace,
    Clear,
    Binary(BinaryOp),
    Equals,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CalculatorState {
    entry: String,
    accumulator: Option<f64>,
    pending_op: Option<BinaryOp>,
    replace_entry: bool,
    error: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            entry: "0".to_string(),
            accumulator: None,
            pending_op: None,
            replace_entry: true,
            error: false,
        }
    }
}

impl CalculatorState {
    pub(crate) fn apply(&mut self, action: CalcAction) {
        match action {
            CalcAction::Digit(digit) => self.input_digit(digit),
            CalcAction::Decimal => self.input_decimal(),
            CalcAction::Backspace => self.backspace(),
            CalcAction::Clear => *self = Self::default(),
            CalcAction::Binary(op) => self.set_pending_operation(op),
            CalcAction::Equals => self.equals(),
        }
    }

    pub(crate) fn display_text(&self) -> &str {
        if self.error {
            ERROR_TEXT
        } else {
            &self.entry
        }
    }

    pub(crate) fn pending_op(&self) -> Option<BinaryOp> {
        self.pending_op
    }

    fn current_value(&self) -> Option<f64> {
        if self.error {
            return None;
        }
        self.entry.parse::<f64>().ok()
    }

    fn input_digit(&mut self, digit: char) {
        if self.error {
            *self = Self::default();
        }
        if self.replace_entry {
            self.entry = digit.to_string();
            self.replace_entry = false;
            return;
        }
        let digits = self.entry.chars().filter(char::is_ascii_digit).count();
        if digits >= MAX_ENTRY_DIGITS {
            return;
        }
        if self.entry == "0" {
            self.entry = digit.to_string();
        } else {
            self.entry.push(digit);
        }
    }

    fn input_decimal(&mut self) {
        if self.error {
            *self = Self::default();
        }
        if self.replace_entry {
            self.entry = "0.".to_string();
            self.replace_entry = false;
            return;
        }
        if !self.entry.contains('.') {
            self.entry.push('.');
        }
    }

    fn backspace(&mut self) {
        if self.error {
            *self = Self::default();
            return;
        }
        if self.replace_entry {
            return;
        }
        self.entry.pop();
        if self.entry.is_empty() || self.entry == "-" {
            self.entry = "0".to_string();
            self.replace_entry = true;
        }
    }

    // Chaining: `2 + 3 *` evaluates the pending `+` before arming `*`.
    fn set_pending_operation(&mut self, op: BinaryOp) {
        let Some(current) = self.current_value() else {
            return;
        };
        let base = match (self.accumulator, self.pending_op, self.replace_entry) {
            (Some(acc), Some(pending), false) => match apply_binary(acc, pending, current) {
                Some(value) => value,
                None => {
                    self.error = true;
                    return;
                }
            },
            (Some(acc), Some(_), true) => acc,
            _ => current,
        };
        self.accumulator = Some(base);
        self.pending_op = Some(op);
        self.entry = format_number(base);
        self.replace_entry = true;
    }

    fn equals(&mut self) {
        let (Some(acc), Some(op)) = (self.accumulator, self.pending_op) else {
            return;
        };
        let Some(rhs) = self.current_value() else {
            return;
        };
        self.accumulator = None;
        self.pending_op = None;
        self.replace_entry = true;
        match apply_binary(acc, op, rhs) {
            Some(result) => self.entry = format_number(result),
            None => {
                self.entry = "0".to_string();
                self.error = true;
            }
        }
    }
}

pub(crate) fn keyboard_action(key: &str) -> Option<CalcAction> {
    let mut chars = key.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_digit() {
            return Some(CalcAction::Digit(ch));
        }
    }
    match key {
        "." | "," => Some(CalcAction::Decimal),
        "+" => Some(CalcAction::Binary(BinaryOp::Add)),
        "-" => Some(CalcAction::Binary(BinaryOp::Subtract)),
        "*" | "x" | "X" => Some(CalcAction::Binary(BinaryOp::Multiply)),
        "/" => Some(CalcAction::Binary(BinaryOp::Divide)),
        "=" | "Enter" => Some(CalcAction::Equals),
        "Backspace" | "back" => Some(CalcAction::Backspace),
        "Escape" | "Delete" | "C" | "c" => Some(CalcAction::Clear),
        _ => None,
    }
}

fn apply_binary(lhs: f64, op: BinaryOp, rhs: f64) -> Option<f64> {
    let result = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide if rhs == 0.0 => return None,
        BinaryOp::Divide => lhs / rhs,
    };
    result.is_finite().then_some(result)
}

pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let mut text = format!("{value:.10}");
    while text.contains('.') && text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn press(state: &mut CalculatorState, keys: &[&str]) {
        for key in keys {
            let action = keyboard_action(key).unwrap_or_else(|| panic!("unmapped key {key}"));
            state.apply(action);
        }
    }

    #[test]
    fn addition_produces_sum() {
        let mut state = CalculatorState::default();
        press(&mut state, &["7", "+", "3", "="]);
        assert_eq!(state.display_text(), "10");
    }

    #[test]
    fn divide_by_zero_shows_error_and_next_digit_recovers() {
        let mut state = CalculatorState::default();
        press(&mut state, &["1", "/", "0", "="]);
        assert_eq!(state.display_text(), "Error");
        assert_eq!(state.pending_op(), None);

        press(&mut state, &["4"]);
        assert_eq!(state.display_text(), "4");
        press(&mut state, &["*", "2", "="]);
        assert_eq!(state.display_text(), "8");
    }

    #[test]
    fn chained_operators_evaluate_left_to_right() {
        let mut state = CalculatorState::default();
        press(&mut state, &["2", "+", "3", "*"]);
        assert_eq!(state.display_text(), "5");
        assert_eq!(state.pending_op(), Some(BinaryOp::Multiply));
        press(&mut state, &["4", "="]);
        assert_eq!(state.display_text(), "20");
    }

    #[test]
    fn repeated_operator_only_replaces_pending_op() {
        let mut state = CalculatorState::default();
        press(&mut state, &["9", "+", "-", "4", "="]);
        assert_eq!(state.display_text(), "5");
    }

    #[test]
    fn decimal_and_backspace_edit_entry() {
        let mut state = CalculatorState::default();
        press(&mut state, &[".", "5", ".", "2"]);
        assert_eq!(state.display_text(), "0.52");
        press(&mut state, &["Backspace", "Backspace"]);
        assert_eq!(state.display_text(), "0.");
        press(&mut state, &["Backspace", "Backspace"]);
        assert_eq!(state.display_text(), "0");
        press(&mut state, &["1", "+", "0"]);
        assert_eq!(state.display_text(), "0");
        press(&mut state, &["="]);
        assert_eq!(state.display_text(), "1");
    }

    #[test]
    fn fractional_results_are_trimmed() {
        let mut state = CalculatorState::default();
        press(&mut state, &["1", "/", "4", "="]);
        assert_eq!(state.display_text(), "0.25");
        press(&mut state, &["C"]);
        assert_eq!(state, CalculatorState::default());
    }

    #[test]
    fn entry_length_is_capped() {
        let mut state = CalculatorState::default();
        for _ in 0..(MAX_ENTRY_DIGITS + 4) {
            state.apply(CalcAction::Digit('9'));
        }
        assert_eq!(state.display_text().len(), MAX_ENTRY_DIGITS);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(keyboard_action("ArrowUp"), None);
        assert_eq!(keyboard_action("12"), None);
    }
}
