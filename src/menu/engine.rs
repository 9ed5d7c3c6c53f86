use super::forms::{option, option_count, Field, Form, Variable, Widget, FORMS};
use super::input::Command;
use std::borrow::Cow;
use tracing::debug;

///
/// Values the menu edits
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Values {
    pub number: u8,
    pub fruit: u8,
    pub check: u8,
    pub color: u8,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            number: 2,
            fruit: 2,
            check: 0,
            color: 0,
        }
    }
}

impl Values {
    pub fn get(&self, variable: Variable) -> u8 {
        match variable {
            Variable::Number => self.number,
            Variable::Fruit => self.fruit,
            Variable::Check => self.check,
            Variable::Color => self.color,
        }
    }

    fn set(&mut self, variable: Variable, value: u8) {
        match variable {
            Variable::Number => self.number = value,
            Variable::Fruit => self.fruit = value,
            Variable::Check => self.check = value,
            Variable::Color => self.color = value,
        }
    }
}

/// Where a go-back returns to
#[derive(Debug, Clone, Copy)]
struct ReturnPoint {
    form: &'static Form,
    focus: usize,
    /// Options of the combo field that opened the current form
    choices: &'static str,
}

///
/// Current form, focused field and edited values of the menu
///
#[derive(Debug)]
pub struct Menu {
    forms: &'static [Form],
    form: &'static Form,
    focus: usize,
    values: Values,
    back: Option<ReturnPoint>,
}

impl Menu {
    ///
    /// Starts on the first form of `forms`; `None` if there is none.
    ///
    pub fn new(forms: &'static [Form]) -> Option<Self> {
        let form = forms.first()?;
        Some(Self {
            forms,
            form,
            focus: 0,
            values: Values::default(),
            back: None,
        })
    }

    /// Menu over the demo form table
    pub fn demo() -> Self {
        Self {
            forms: FORMS,
            form: &FORMS[0],
            focus: 0,
            values: Values::default(),
            back: None,
        }
    }

    pub fn form(&self) -> &'static Form {
        self.form
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&'static Field> {
        self.form.fields().nth(self.focus)
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    ///
    /// Switches to form `id` with focus on its first field. Unknown ids are
    /// rejected and leave the menu as it was.
    ///
    pub fn enter_form(&mut self, id: u8) -> bool {
        self.jump(id, "")
    }

    pub fn next_field(&mut self) {
        let count = self.form.fields().count();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.form.fields().count();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Activates the focused field
    pub fn select(&mut self) {
        let Some(field) = self.focused() else {
            return;
        };
        match field.widget {
            Widget::GotoButton | Widget::GotoHalfWidth | Widget::GotoLine => {
                self.enter_form(field.arg);
            }
            Widget::NumberInput => self.step(Variable::Number, 10),
            Widget::OptionCycle => self.step(Variable::Fruit, option_count(field.text)),
            Widget::Checkbox => self.step(Variable::Check, 2),
            Widget::ComboShow => {
                let value = self.values.color;
                if self.jump(field.arg, field.text) {
                    self.focus = self
                        .form
                        .fields()
                        .position(|f| f.widget == Widget::ComboAssign && f.arg == value)
                        .unwrap_or(0);
                }
            }
            Widget::ComboAssign => {
                self.values.set(Variable::Color, field.arg);
                self.go_back();
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::NextField => self.next_field(),
            Command::PrevField => self.prev_field(),
            Command::Select => self.select(),
            Command::Quit => {}
        }
    }

    ///
    /// Text a field shows for the current values
    ///
    pub fn field_text(&self, field: &Field) -> Cow<'static, str> {
        match field.widget {
            Widget::NumberInput => Cow::Owned(self.values.number.to_string()),
            Widget::OptionCycle | Widget::ComboShow => {
                let value = field.widget.variable().map_or(0, |v| self.values.get(v));
                Cow::Borrowed(
                    option(field.text, value as usize)
                        .or_else(|| option(field.text, 0))
                        .unwrap_or(""),
                )
            }
            Widget::ComboAssign if field.text.is_empty() => {
                let choices = self.back.map_or("", |back| back.choices);
                Cow::Borrowed(option(choices, field.arg as usize).unwrap_or(""))
            }
            Widget::Checkbox => Cow::Borrowed(""),
            Widget::ComboAssign | Widget::GotoButton | Widget::GotoHalfWidth | Widget::GotoLine => {
                Cow::Borrowed(field.text)
            }
        }
    }

    ///
    /// Whether a checkbox is ticked or an assign field holds the current
    /// combo value
    ///
    pub fn is_checked(&self, field: &Field) -> bool {
        match field.widget {
            Widget::Checkbox => self.values.check != 0,
            Widget::ComboAssign => self.values.color == field.arg,
            _ => false,
        }
    }

    ///
    /// Advances `variable` to the next of `count` values. A value out of
    /// range for this field is shown as the first option, so it steps from
    /// there.
    ///
    fn step(&mut self, variable: Variable, count: usize) {
        let current = self.values.get(variable) as usize;
        let current = if current >= count { 0 } else { current };
        let next = current + 1;
        let next = if next >= count { 0 } else { next };
        self.values.set(variable, next as u8);
    }

    fn jump(&mut self, id: u8, choices: &'static str) -> bool {
        let Some(target) = self.forms.iter().find(|form| form.id == id) else {
            debug!(id, "no such form");
            return false;
        };
        self.back = Some(ReturnPoint {
            form: self.form,
            focus: self.focus,
            choices,
        });
        self.form = target;
        self.focus = 0;
        true
    }

    fn go_back(&mut self) {
        if let Some(back) = self.back.take() {
            self.form = back.form;
            self.focus = back.focus;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_on(id: u8) -> Menu {
        let mut menu = Menu::demo();
        assert!(menu.enter_form(id));
        menu
    }

    fn focus_widget(menu: &mut Menu, widget: Widget) {
        let index = menu.form().fields().position(|f| f.widget == widget).unwrap();
        while menu.focus_index() != index {
            menu.next_field();
        }
    }

    #[test]
    fn starts_on_main_menu() {
        let menu = Menu::demo();
        assert_eq!(menu.form().id, 1);
        assert_eq!(menu.focused().unwrap().text, "Test 1");
        assert_eq!(*menu.values(), Values::default());
    }

    #[test]
    fn empty_table_has_no_menu() {
        static NO_FORMS: &[Form] = &[];
        assert!(Menu::new(NO_FORMS).is_none());
        assert_eq!(Menu::new(FORMS).unwrap().form().id, 1);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut menu = Menu::demo();
        menu.prev_field();
        assert_eq!(menu.focused().unwrap().text, "Selection/Combo Box");
        menu.next_field();
        assert_eq!(menu.focus_index(), 0);
    }

    #[test]
    fn goto_enters_target_form() {
        let mut menu = Menu::demo();
        menu.next_field();
        menu.select();
        assert_eq!(menu.form().id, 10);
        assert_eq!(menu.focus_index(), 0);
    }

    #[test]
    fn unknown_form_is_rejected() {
        let mut menu = Menu::demo();
        menu.next_field();
        assert!(!menu.enter_form(99));
        assert_eq!(menu.form().id, 1);
        assert_eq!(menu.focus_index(), 1);
    }

    #[test]
    fn number_steps_and_wraps() {
        let mut menu = menu_on(10);
        for _ in 0..7 {
            menu.select();
        }
        assert_eq!(menu.values().number, 9);
        assert_eq!(menu.field_text(menu.focused().unwrap()), "9");
        menu.select();
        assert_eq!(menu.values().number, 0);
    }

    #[test]
    fn option_cycles_through_list() {
        let mut menu = menu_on(11);
        let field = menu.focused().unwrap();
        assert_eq!(menu.field_text(field), "Melon");
        menu.select();
        assert_eq!(menu.field_text(field), "Cranberry");
        menu.select();
        assert_eq!(menu.field_text(field), "Banana");
    }

    #[test]
    fn option_out_of_range_steps_from_first() {
        let mut menu = menu_on(11);
        menu.select(); // Cranberry, index 3
        assert!(menu.enter_form(2));
        focus_widget(&mut menu, Widget::OptionCycle);
        // form 2 has three fruits, index 3 shows the first
        let field = menu.focused().unwrap();
        assert_eq!(menu.field_text(field), "Banana");
        menu.select();
        assert_eq!(menu.field_text(field), "Apple");
        assert_eq!(menu.values().fruit, 1);
    }

    #[test]
    fn checkbox_toggles() {
        let mut menu = menu_on(2);
        focus_widget(&mut menu, Widget::Checkbox);
        let field = menu.focused().unwrap();
        assert!(!menu.is_checked(field));
        menu.select();
        assert!(menu.is_checked(field));
        menu.select();
        assert_eq!(menu.values().check, 0);
    }

    #[test]
    fn combo_box_round_trip() {
        let mut menu = menu_on(11);
        focus_widget(&mut menu, Widget::ComboShow);
        let combo_focus = menu.focus_index();
        assert_eq!(menu.field_text(menu.focused().unwrap()), "red");

        menu.select();
        assert_eq!(menu.form().id, 12);
        // focus starts on the current choice
        assert_eq!(menu.focused().unwrap().arg, 0);
        let texts: Vec<_> = menu.form().fields().map(|f| menu.field_text(f)).collect();
        assert_eq!(texts, ["red", "green", "blue"]);

        menu.next_field();
        menu.select();
        assert_eq!(menu.values().color, 1);
        assert_eq!(menu.form().id, 11);
        assert_eq!(menu.focus_index(), combo_focus);
        assert_eq!(menu.field_text(menu.focused().unwrap()), "green");
    }

    #[test]
    fn combo_sub_form_focuses_current_value() {
        let mut menu = menu_on(2);
        focus_widget(&mut menu, Widget::ComboShow);
        menu.select();
        menu.next_field();
        menu.next_field();
        menu.select();
        assert_eq!(menu.values().color, 2);

        menu.select();
        assert_eq!(menu.form().id, 4);
        let field = menu.focused().unwrap();
        assert_eq!(field.arg, 2);
        assert_eq!(menu.field_text(field), "blue color");
        assert!(menu.is_checked(field));
    }

    #[test]
    fn commands_drive_the_menu() {
        let mut menu = Menu::demo();
        menu.apply(Command::NextField);
        menu.apply(Command::NextField);
        menu.apply(Command::PrevField);
        menu.apply(Command::Select);
        assert_eq!(menu.form().id, 10);
        menu.apply(Command::Quit);
        assert_eq!(menu.form().id, 10);
    }
}
