//! Static clinic data: identity, treatments and bookable slots
//!
//! The catalog is built once at startup and shared read-only. Treatment and
//! slot numbering shown to users is derived from the order of these lists,
//! so the order must not change while the process runs.

use serde::Serialize;
use std::fmt::Write;

/// A bookable treatment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Treatment {
    pub id: u32,
    pub name: String,
    /// Price in IDR
    pub price: u64,
    pub duration_minutes: u32,
}

impl Treatment {
    pub fn new(id: u32, name: impl Into<String>, price: u64, duration_minutes: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            duration_minutes,
        }
    }

    /// `Advanced Vitamin C - IDR 850,000 (90 min)`
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ({} min)",
            self.name,
            format_price(self.price),
            self.duration_minutes
        )
    }
}

/// A bookable date/time, identified by its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub label: String,
}

impl Slot {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Read-only clinic catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    treatments: Vec<Treatment>,
    slots: Vec<Slot>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, treatments: Vec<Treatment>, slots: Vec<Slot>) -> Self {
        Self {
            name: name.into(),
            treatments,
            slots,
        }
    }

    /// The clinic this bot books for
    pub fn jakarta_aesthetic() -> Self {
        Self::new(
            "Jakarta Aesthetic Clinic",
            vec![
                Treatment::new(1, "Basic Brightening Facial", 500_000, 60),
                Treatment::new(2, "Advanced Vitamin C", 850_000, 90),
                Treatment::new(3, "Medical Grade Treatment", 1_200_000, 120),
            ],
            vec![
                Slot::new("Dec 13 - 10:00 AM"),
                Slot::new("Dec 13 - 2:00 PM"),
                Slot::new("Dec 14 - 10:00 AM"),
                Slot::new("Dec 14 - 3:00 PM"),
                Slot::new("Dec 15 - 11:00 AM"),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    pub fn find_treatment(&self, id: u32) -> Option<&Treatment> {
        self.treatments.iter().find(|t| t.id == id)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Look up a slot by its 1-based position
    pub fn slot(&self, number: usize) -> Option<&Slot> {
        number.checked_sub(1).and_then(|index| self.slots.get(index))
    }

    /// Numbered treatment list, one line per treatment
    pub fn render_treatments(&self) -> String {
        let mut out = String::new();
        for treatment in &self.treatments {
            let _ = writeln!(out, "{}. {}", treatment.id, treatment.summary());
        }
        out.trim_end().to_string()
    }

    /// Numbered slot list, 1-based
    pub fn render_slots(&self) -> String {
        let mut out = String::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, slot.label);
        }
        out.trim_end().to_string()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::jakarta_aesthetic()
    }
}

/// Render an IDR amount with thousands separators: `IDR 1,200,000`
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("IDR {grouped}")
}
