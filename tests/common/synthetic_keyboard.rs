//! Renders flat, top-down keyboard images: light keycaps on a dark case with
//! dark legends.

use image::GrayImage;
use keyboard_detector::ocr::{RecognizerConfig, TextShape};

pub const BACKGROUND: u8 = 30;
pub const KEYCAP: u8 = 200;
pub const LEGEND: u8 = 30;

/// Horizontal pitch of a 1U key and vertical pitch of a row.
pub const UNIT: usize = 64;
pub const KEY_HEIGHT: usize = 44;
pub const GAP: usize = 10;
pub const MARGIN: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Iso,
    Ansi,
}

/// Legend drawn on the key left of the spacebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsLegend {
    /// Closed loop, like the command symbol.
    Ring,
    /// Four separate panes, like the Windows flag.
    FourPanes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Legend {
    Dot,
    Ring,
    FourPanes,
}

#[derive(Clone, Debug)]
pub struct RenderedKey {
    pub name: &'static str,
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

pub struct SyntheticKeyboard {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
    pub keys: Vec<RenderedKey>,
}

impl SyntheticKeyboard {
    pub fn key(&self, name: &str) -> &RenderedKey {
        self.keys
            .iter()
            .find(|k| k.name == name)
            .unwrap_or_else(|| panic!("no key named {name}"))
    }
}

/// One row as `(name, width in units)`; `None` names leave a gap.
type Row = Vec<(Option<&'static str>, f32)>;

fn letters(names: &[&'static str]) -> Row {
    names.iter().map(|n| (Some(*n), 1.0)).collect()
}

fn rows(format: Format) -> [Row; 5] {
    let mut number = letters(&[
        "`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=",
    ]);
    number.push((Some("backspace"), 2.0));

    let mut top = vec![(Some("tab"), 1.5)];
    top.extend(letters(&["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]"]));

    let mut home = vec![(Some("caps"), 1.75)];
    home.extend(letters(&["A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'"]));

    let mut shift = Vec::new();
    match format {
        Format::Ansi => {
            top.push((Some("\\"), 1.5));
            home.push((Some("enter"), 2.25));
            shift.push((Some("shift"), 2.25));
        }
        Format::Iso => {
            home.push((Some("#"), 1.0));
            shift.push((Some("shift"), 1.25));
            shift.push((Some("<"), 1.0));
        }
    }
    shift.extend(letters(&["Z", "X", "C", "V", "B", "N", "M", ",", ".", "/"]));
    shift.push((Some("rshift"), 2.75));

    let bottom = vec![
        (Some("ctrl"), 1.25),
        (Some("alt"), 1.25),
        (Some("os"), 1.25),
        (Some("space"), 5.0),
        (Some("altgr"), 1.25),
        (Some("fn"), 1.25),
        (Some("menu"), 1.25),
        (Some("rctrl"), 1.25),
    ];
    [number, top, home, shift, bottom]
}

pub fn render_keyboard(format: Format, os: OsLegend) -> SyntheticKeyboard {
    let width = 2 * MARGIN + 15 * UNIT - GAP;
    let height = 2 * MARGIN + 5 * UNIT - (UNIT - KEY_HEIGHT);
    let mut img = GrayImage::from_pixel(width as u32, height as u32, image::Luma([BACKGROUND]));
    let mut keys = Vec::new();

    for (r, row) in rows(format).iter().enumerate() {
        let mut units = 0.0f32;
        for &(name, w) in row {
            if let Some(name) = name {
                let key = RenderedKey {
                    name,
                    row: MARGIN + r * UNIT,
                    col: MARGIN + (units * UNIT as f32).round() as usize,
                    height: KEY_HEIGHT,
                    width: (w * UNIT as f32).round() as usize - GAP,
                };
                let legend = match (name, os) {
                    ("os", OsLegend::Ring) => Legend::Ring,
                    ("os", OsLegend::FourPanes) => Legend::FourPanes,
                    _ => Legend::Dot,
                };
                draw_key(&mut img, &key, legend);
                keys.push(key);
            }
            units += w;
        }
    }

    if format == Format::Iso {
        // Tall enter spanning the top and home rows at the right edge.
        let key = RenderedKey {
            name: "enter",
            row: MARGIN + UNIT,
            col: MARGIN + (13.75 * UNIT as f32) as usize,
            height: UNIT + KEY_HEIGHT,
            width: (1.25 * UNIT as f32) as usize - GAP,
        };
        draw_key(&mut img, &key, Legend::Dot);
        keys.push(key);
    }

    SyntheticKeyboard {
        width,
        height,
        data: img.into_raw(),
        keys,
    }
}

fn fill(img: &mut GrayImage, row: usize, col: usize, h: usize, w: usize, value: u8) {
    for y in row..row + h {
        for x in col..col + w {
            img.put_pixel(x as u32, y as u32, image::Luma([value]));
        }
    }
}

fn draw_key(img: &mut GrayImage, key: &RenderedKey, legend: Legend) {
    fill(img, key.row, key.col, key.height, key.width, KEYCAP);
    let cy = key.row + key.height / 2;
    let cx = key.col + key.width / 2;
    match legend {
        Legend::Dot => fill(img, cy - 5, cx - 5, 10, 10, LEGEND),
        Legend::Ring => {
            fill(img, cy - 10, cx - 10, 20, 20, LEGEND);
            fill(img, cy - 4, cx - 4, 8, 8, KEYCAP);
        }
        Legend::FourPanes => {
            for (dy, dx) in [(0, 0), (0, 12), (12, 0), (12, 12)] {
                fill(img, cy - 10 + dy, cx - 10 + dx, 8, 8, LEGEND);
            }
        }
    }
}

/// Recognizer reading wide patches as the top letter row, single characters
/// as `letter` and everything else as `label`.
pub fn scripted_recognizer(
    row: &'static str,
    letter: &'static str,
    label: &'static str,
) -> impl Fn(&GrayImage, &RecognizerConfig) -> String + Send + Sync {
    move |patch: &GrayImage, config: &RecognizerConfig| match config.shape {
        TextShape::IsolatedCharacter => letter.to_string(),
        TextShape::ShortWord if patch.width() > 300 => row.to_string(),
        TextShape::ShortWord => label.to_string(),
    }
}
