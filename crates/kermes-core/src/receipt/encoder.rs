//! Per-item slip encoding.

use chrono::{Local, NaiveDateTime};

use super::directive::{render, Alignment, Directive, FontSize};
use crate::money::Money;
use crate::printer::DeviceProfile;
use crate::types::CartItem;

/// Separator columns on the reference 72mm roll.
const REFERENCE_COLUMNS: u32 = 32;
const REFERENCE_WIDTH_MM: u32 = 72;

/// Layout parameters that shape the text of a slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLayout {
    /// Number of `-` characters in the separator line.
    pub separator_width: usize,
    /// Suffixed to every monetary amount.
    pub currency_glyph: char,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        ReceiptLayout {
            separator_width: REFERENCE_COLUMNS as usize,
            currency_glyph: '€',
        }
    }
}

impl ReceiptLayout {
    /// Scales the separator to the profile's paper width, proportionally
    /// to 32 columns on 72mm paper (58mm → 25, 80mm → 35).
    pub fn for_profile(profile: &DeviceProfile) -> Self {
        let columns = profile.paper_width_mm.saturating_mul(REFERENCE_COLUMNS) / REFERENCE_WIDTH_MM;
        ReceiptLayout {
            separator_width: columns.max(1) as usize,
            ..ReceiptLayout::default()
        }
    }
}

/// The directives for one cart item's slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub directives: Vec<Directive>,
}

/// A full print job: one segment per item, then a single reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptProgram {
    pub segments: Vec<Segment>,
}

impl ReceiptProgram {
    /// Every directive in emission order, including the trailing reset.
    pub fn directives(&self) -> Vec<Directive> {
        self.segments
            .iter()
            .flat_map(|segment| segment.directives.iter().cloned())
            .chain(std::iter::once(Directive::Reset))
            .collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        render(&self.directives())
    }
}

/// Turns cart contents into printer control codes.
///
/// Each item gets its own slip, cut separately, and the device is
/// re-initialized between slips.
///
/// ## Slip Layout
/// ```text
/// ESC @                      initialize
/// ESC a 1, ESC E 1, GS ! 11  center, bold, large
/// Gözleme\n
/// GS ! 00, ESC E 0, ESC a 0  normal, not bold, left
/// Category: food\n
/// Quantity: 2\n
/// Price: 5.00€ each\n
/// Total: 10.00€\n
/// Date: 2026-05-01 12:30:00\n
/// --------------------------------\n
/// GS V 41 00                 cut
/// ... next item ...
/// ESC @                      reset (once, after the last slip)
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReceiptEncoder {
    layout: ReceiptLayout,
}

impl ReceiptEncoder {
    pub fn new(layout: ReceiptLayout) -> Self {
        ReceiptEncoder { layout }
    }

    pub fn layout(&self) -> &ReceiptLayout {
        &self.layout
    }

    /// Encodes `items`, stamping every slip with the current local time.
    pub fn encode(&self, items: &[CartItem]) -> Vec<u8> {
        self.encode_at(items, Local::now().naive_local())
    }

    /// Encodes `items` with a fixed print time.
    pub fn encode_at(&self, items: &[CartItem], printed_at: NaiveDateTime) -> Vec<u8> {
        self.program_at(items, printed_at).to_bytes()
    }

    /// Builds the directive program without rendering it.
    pub fn program_at(&self, items: &[CartItem], printed_at: NaiveDateTime) -> ReceiptProgram {
        let stamp = printed_at.format("%Y-%m-%d %H:%M:%S").to_string();
        ReceiptProgram {
            segments: items.iter().map(|item| self.segment(item, &stamp)).collect(),
        }
    }

    fn segment(&self, item: &CartItem, stamp: &str) -> Segment {
        let product = &item.product;
        let directives = vec![
            Directive::Initialize,
            Directive::Align(Alignment::Center),
            Directive::Bold(true),
            Directive::Size(FontSize::Large),
            Directive::Line(product.name.clone()),
            Directive::Size(FontSize::Normal),
            Directive::Bold(false),
            Directive::Align(Alignment::Left),
            Directive::Line(format!("Category: {}", product.category)),
            Directive::Line(format!("Quantity: {}", item.quantity)),
            Directive::Line(format!("Price: {} each", self.money(product.price))),
            Directive::Line(format!("Total: {}", self.money(item.line_total()))),
            Directive::Line(format!("Date: {}", stamp)),
            Directive::Line("-".repeat(self.layout.separator_width)),
            Directive::Cut,
        ];
        Segment { directives }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_glyph(self.layout.currency_glyph)
    }
}
