use crate::simulation::MAX_OPPONENTS;

use super::{AppState, Scene};

const TRIAL_STEP: usize = 1_000;
const MAX_TRIALS: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Opponents,
    Board,
    Hero,
    Known(usize),
    Trials,
}

const FORM_FIELDS: [FormField; 6] = [
    FormField::Opponents,
    FormField::Board,
    FormField::Hero,
    FormField::Known(0),
    FormField::Known(1),
    FormField::Trials,
];

impl FormField {
    fn display(self, app: &AppState) -> String {
        match self {
            FormField::Opponents => format!("Opponents: {}", app.cfg_opponents),
            FormField::Board => format!("Community cards: {}", placeholder(&app.cfg_board)),
            FormField::Hero => format!("Your hand: {}", placeholder(&app.cfg_hero)),
            FormField::Known(i) => {
                format!("Opponent {} hand: {}", i + 1, placeholder(&app.cfg_known[i]))
            }
            FormField::Trials => format!("Simulations: {}", app.cfg_trials),
        }
    }

    /// Cap on typed characters; `None` for numeric fields.
    fn text_limit(self) -> Option<usize> {
        match self {
            FormField::Board => Some(14),
            FormField::Hero | FormField::Known(_) => Some(5),
            FormField::Opponents | FormField::Trials => None,
        }
    }

    fn text_mut(self, app: &mut AppState) -> Option<&mut String> {
        match self {
            FormField::Board => Some(&mut app.cfg_board),
            FormField::Hero => Some(&mut app.cfg_hero),
            FormField::Known(i) => app.cfg_known.get_mut(i),
            FormField::Opponents | FormField::Trials => None,
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            FormField::Opponents => {
                if app.cfg_opponents < MAX_OPPONENTS {
                    app.cfg_opponents += 1;
                }
            }
            FormField::Trials => {
                app.cfg_trials = (app.cfg_trials + TRIAL_STEP).min(MAX_TRIALS);
            }
            _ => {}
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            FormField::Opponents => {
                if app.cfg_opponents > 1 {
                    app.cfg_opponents -= 1;
                }
            }
            FormField::Trials => {
                app.cfg_trials = app.cfg_trials.saturating_sub(TRIAL_STEP).max(TRIAL_STEP);
            }
            _ => {}
        }
    }
}

fn placeholder(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

impl AppState {
    pub fn form_items_display(&self) -> Vec<String> {
        FORM_FIELDS.iter().map(|field| field.display(self)).collect()
    }

    fn field(&self) -> FormField {
        FORM_FIELDS[self.form_index % FORM_FIELDS.len()]
    }

    /// Whether the focused field takes typed characters.
    pub fn form_field_is_text(&self) -> bool {
        self.field().text_limit().is_some()
    }

    pub fn open_form(&mut self) {
        self.scene = Scene::Form;
    }

    pub fn form_next(&mut self) {
        self.form_index = (self.form_index + 1) % FORM_FIELDS.len();
    }
    pub fn form_prev(&mut self) {
        self.form_index = (self.form_index + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }
    pub fn form_inc(&mut self) {
        self.field().inc(self);
    }
    pub fn form_dec(&mut self) {
        self.field().dec(self);
    }

    pub fn form_push(&mut self, c: char) {
        let field = self.field();
        let Some(limit) = field.text_limit() else {
            return;
        };
        if !(c.is_ascii_alphanumeric() || c == ' ') {
            return;
        }
        if let Some(buf) = field.text_mut(self) {
            if buf.len() < limit {
                buf.push(c);
            }
        }
    }

    pub fn form_backspace(&mut self) {
        let field = self.field();
        if let Some(buf) = field.text_mut(self) {
            buf.pop();
        }
    }

    pub fn form_clear(&mut self) {
        let field = self.field();
        if let Some(buf) = field.text_mut(self) {
            buf.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_clamp() {
        let mut app = AppState::default();
        for _ in 0..20 {
            app.form_inc();
        }
        assert_eq!(app.cfg_opponents, MAX_OPPONENTS);
        for _ in 0..20 {
            app.form_dec();
        }
        assert_eq!(app.cfg_opponents, 1);

        app.form_index = FORM_FIELDS.len() - 1;
        for _ in 0..200 {
            app.form_dec();
        }
        assert_eq!(app.cfg_trials, TRIAL_STEP);
    }

    #[test]
    fn text_fields_cap_and_filter() {
        let mut app = AppState::default();
        app.form_index = 2;
        assert!(app.form_field_is_text());
        for c in "As,Kd!Qh".chars() {
            app.form_push(c);
        }
        assert_eq!(app.cfg_hero, "AsKdQ");
        app.form_backspace();
        assert_eq!(app.cfg_hero, "AsKd");
        app.form_clear();
        assert!(app.cfg_hero.is_empty());
    }
}
