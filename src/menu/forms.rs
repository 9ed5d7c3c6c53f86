//! Form table of the demo menu.
//!
//! Coordinates are in pixels, `y` is the text baseline.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Regular,
    Bold,
}

/// Application variable a field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Number,
    Fruit,
    Check,
    Color,
}

///
/// Field behavior. The meaning of a field's `arg` depends on it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Button as wide as its text; `arg` is the target form
    GotoButton,
    /// Half display width button centred on `x`; `arg` is the target form
    GotoHalfWidth,
    /// Button spanning from `x` to the right edge; `arg` is the target form
    GotoLine,
    /// Digit 0..=9, select steps it
    NumberInput,
    /// Cycles through the `|`-separated options of its text; `arg` is the width
    OptionCycle,
    Checkbox,
    /// Shows the chosen option, select opens the sub-form `arg`
    ComboShow,
    /// Assigns `arg` to the combo variable and returns
    ComboAssign,
}

impl Widget {
    pub fn variable(self) -> Option<Variable> {
        match self {
            Widget::NumberInput => Some(Variable::Number),
            Widget::OptionCycle => Some(Variable::Fruit),
            Widget::Checkbox => Some(Variable::Check),
            Widget::ComboShow | Widget::ComboAssign => Some(Variable::Color),
            Widget::GotoButton | Widget::GotoHalfWidth | Widget::GotoLine => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub widget: Widget,
    pub x: i32,
    pub y: i32,
    pub arg: u8,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Style(TextStyle),
    Label { x: i32, y: i32, text: &'static str },
    /// Horizontal line from `x` to the right edge
    Rule { x: i32, y: i32 },
    Field(Field),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Form {
    pub id: u8,
    pub items: &'static [Item],
}

impl Form {
    /// Selectable fields in focus order
    pub fn fields(&self) -> impl Iterator<Item = &'static Field> + Clone {
        self.items.iter().filter_map(|item| match item {
            Item::Field(field) => Some(field),
            _ => None,
        })
    }
}

/// Number of options in a `|`-separated list
pub fn option_count(options: &str) -> usize {
    options.split('|').count()
}

/// Option `index` of a `|`-separated list
pub fn option(options: &str, index: usize) -> Option<&str> {
    options.split('|').nth(index)
}

const fn label(x: i32, y: i32, text: &'static str) -> Item {
    Item::Label { x, y, text }
}

const fn rule(x: i32, y: i32) -> Item {
    Item::Rule { x, y }
}

const fn field(widget: Widget, x: i32, y: i32, arg: u8, text: &'static str) -> Item {
    Item::Field(Field {
        widget,
        x,
        y,
        arg,
        text,
    })
}

const BOLD: Item = Item::Style(TextStyle::Bold);
const REGULAR: Item = Item::Style(TextStyle::Regular);

pub static FORMS: &[Form] = &[
    Form {
        id: 1,
        items: &[
            BOLD,
            label(0, 10, "Main Menu"),
            rule(0, 13),
            REGULAR,
            field(Widget::GotoLine, 12, 30, 2, "Test 1"),
            field(Widget::GotoLine, 12, 43, 10, "Enter a number"),
            field(Widget::GotoLine, 12, 55, 11, "Selection/Combo Box"),
        ],
    },
    Form {
        id: 2,
        items: &[
            label(0, 10, "Number:"),
            field(Widget::NumberInput, 50, 10, 0, ""),
            label(0, 22, "Fruit:"),
            field(Widget::OptionCycle, 50, 22, 60, "Banana|Apple|Peach"),
            label(0, 34, "Check:"),
            field(Widget::Checkbox, 50, 34, 0, ""),
            label(0, 46, "Color:"),
            field(Widget::ComboShow, 50, 46, 4, "red|green|blue"),
            field(Widget::GotoHalfWidth, 32, 60, 3, "Goto 2"),
            field(Widget::GotoHalfWidth, 96, 60, 1, "Home"),
        ],
    },
    Form {
        id: 3,
        items: &[field(Widget::GotoHalfWidth, 32, 50, 2, "Goto 1")],
    },
    Form {
        id: 4,
        items: &[
            field(Widget::ComboAssign, 2, 10, 0, ""),
            field(Widget::ComboAssign, 2, 22, 1, ""),
            field(Widget::ComboAssign, 2, 34, 2, "blue color"),
        ],
    },
    // number entry
    Form {
        id: 10,
        items: &[
            BOLD,
            label(0, 10, "Number 0..9 Menu"),
            rule(0, 13),
            REGULAR,
            label(5, 30, "Number:"),
            field(Widget::NumberInput, 50, 30, 0, ""),
            field(Widget::GotoButton, 64, 59, 1, " OK "),
        ],
    },
    // selection / combo box
    Form {
        id: 11,
        items: &[
            BOLD,
            label(0, 10, "Selection/Combo Box"),
            rule(0, 13),
            REGULAR,
            label(5, 29, "Fruit:"),
            field(Widget::OptionCycle, 50, 29, 60, "Banana|Apple|Melon|Cranberry"),
            label(5, 43, "Color:"),
            field(Widget::ComboShow, 50, 43, 12, "red|green|blue"),
            field(Widget::GotoButton, 64, 59, 1, " OK "),
        ],
    },
    // combo box color selection, empty texts take the caller's option
    Form {
        id: 12,
        items: &[
            BOLD,
            label(0, 10, "Color Selection"),
            rule(0, 13),
            REGULAR,
            field(Widget::ComboAssign, 5, 30, 0, ""),
            field(Widget::ComboAssign, 5, 42, 1, ""),
            field(Widget::ComboAssign, 5, 54, 2, "blue"),
        ],
    },
];
