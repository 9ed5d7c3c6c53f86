use super::engine::Menu;
use super::forms::{Field, Item, TextStyle, Widget};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_6X13_BOLD},
        MonoFont, MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

/// Side of the checkbox square
const CHECKBOX_SIZE: u32 = 8;

fn font_for(style: TextStyle) -> &'static MonoFont<'static> {
    match style {
        TextStyle::Regular => &FONT_6X10,
        TextStyle::Bold => &FONT_6X13_BOLD,
    }
}

fn text_width(font: &MonoFont, text: &str) -> u32 {
    text.chars().count() as u32 * (font.character_size.width + font.character_spacing)
}

fn draw_text<D>(
    target: &mut D,
    font: &MonoFont,
    text: &str,
    x: i32,
    y: i32,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if text.is_empty() {
        return Ok(());
    }
    let style = MonoTextStyleBuilder::new()
        .font(font)
        .text_color(color)
        .build();
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Alphabetic).draw(target)?;
    Ok(())
}

///
/// Draws the current form of `menu`, the focused field inverted.
///
/// # Arguments
///
/// * `menu` - menu state to show
/// * `target` - cleared draw target, usually a `FrameBuffer`
///
pub fn draw_menu<D>(menu: &Menu, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let width = target.bounding_box().size.width as i32;
    let focused = menu.focus_index();
    let mut font = font_for(TextStyle::Regular);
    let mut index = 0;

    for item in menu.form().items {
        match item {
            Item::Style(style) => font = font_for(*style),
            Item::Label { x, y, text } => {
                draw_text(target, font, text, *x, *y, BinaryColor::On)?;
            }
            Item::Rule { x, y } => {
                Line::new(Point::new(*x, *y), Point::new(width - 1, *y))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(target)?;
            }
            Item::Field(field) => {
                draw_field(menu, target, font, field, index == focused, width)?;
                index += 1;
            }
        }
    }
    Ok(())
}

fn draw_field<D>(
    menu: &Menu,
    target: &mut D,
    font: &MonoFont,
    field: &Field,
    focused: bool,
    width: i32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text = menu.field_text(field);
    let text_w = text_width(font, &text) as i32;
    let top = field.y - font.baseline as i32 - 1;
    let height = font.character_size.height + 1;

    // checkbox style widgets draw a square left of their text
    if matches!(field.widget, Widget::Checkbox | Widget::ComboAssign) {
        let square = Rectangle::new(
            Point::new(field.x, field.y - CHECKBOX_SIZE as i32 + 1),
            Size::new(CHECKBOX_SIZE, CHECKBOX_SIZE),
        );
        square
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)?;
        if menu.is_checked(field) {
            square
                .offset(-2)
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(target)?;
        }
        let text_x = field.x + CHECKBOX_SIZE as i32 + 3;
        if focused {
            let frame_w = if text.is_empty() { 0 } else { text_w + 3 };
            Rectangle::new(
                Point::new(field.x - 2, top - 1),
                Size::new((CHECKBOX_SIZE as i32 + 4 + frame_w) as u32, height + 2),
            )
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)?;
        }
        return draw_text(target, font, &text, text_x, field.y, BinaryColor::On);
    }

    let (left, region_w, text_x) = match field.widget {
        Widget::GotoHalfWidth => {
            let half = width / 2;
            (field.x - half / 2, half, field.x - text_w / 2)
        }
        Widget::GotoLine => (field.x - 1, width - field.x + 1, field.x),
        Widget::OptionCycle => (field.x - 1, (field.arg as i32).max(text_w) + 2, field.x),
        _ => (field.x - 1, text_w + 2, field.x),
    };

    if focused {
        Rectangle::new(Point::new(left, top), Size::new(region_w.max(0) as u32, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)?;
        draw_text(target, font, &text, text_x, field.y, BinaryColor::Off)
    } else {
        if field.widget == Widget::GotoHalfWidth {
            Rectangle::new(Point::new(left, top), Size::new(region_w.max(0) as u32, height))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(target)?;
        }
        draw_text(target, font, &text, text_x, field.y, BinaryColor::On)
    }
}
