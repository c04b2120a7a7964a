// Product payload validation. All rules run; violations are reported together.
use std::fmt;

use serde_json::Value;

use crate::models::normalize::{to_in_stock, to_price, to_text};
use crate::models::{NewProduct, ProductChanges, ProductPayload};

pub const NAME_RULE: &str = "name is required and must be at least 2 characters";
pub const DESCRIPTION_RULE: &str = "description is required and must be a string";
pub const PRICE_RULE: &str = "price is required and must be a non-negative number";
pub const CATEGORY_RULE: &str = "category is required and must be a string";
pub const IN_STOCK_RULE: &str = "inStock must be a boolean";

const NAME_MIN_CHARS: usize = 2;

static ABSENT: Value = Value::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Create: name, description, price and category are mandatory.
    Full,
    /// Update: only fields present in the payload are checked.
    Partial,
}

/// Ordered list of violated rules; displays as `"a; b; c"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<String>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violations.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a create payload and convert it to typed fields.
/// A missing `inStock` means out of stock.
pub fn validate_new(payload: &ProductPayload) -> Result<NewProduct, ValidationErrors> {
    let changes = validate(payload, ValidationMode::Full)?;
    match changes {
        ProductChanges {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            category: Some(category),
            in_stock,
        } => Ok(NewProduct {
            name,
            description,
            price,
            category,
            in_stock: in_stock.unwrap_or(false),
        }),
        // Full mode already reports every missing mandatory field.
        incomplete => Err(ValidationErrors {
            violations: missing_rules(&incomplete),
        }),
    }
}

/// Validate an update payload; the result holds only the fields that were sent.
pub fn validate_changes(payload: &ProductPayload) -> Result<ProductChanges, ValidationErrors> {
    validate(payload, ValidationMode::Partial)
}

pub fn validate(
    payload: &ProductPayload,
    mode: ValidationMode,
) -> Result<ProductChanges, ValidationErrors> {
    let mut violations = Vec::new();
    let mut changes = ProductChanges::default();

    let checked = |field: &str| mode == ValidationMode::Full || payload.contains(field);
    let value = |field: &str| payload.get(field).unwrap_or(&ABSENT);

    if checked("name") {
        match value("name").as_str() {
            Some(name) if name.trim().chars().count() >= NAME_MIN_CHARS => {
                changes.name = Some(name.to_string())
            }
            _ => violations.push(NAME_RULE.to_string()),
        }
    }

    if checked("description") {
        match to_text(value("description")) {
            Some(description) => changes.description = Some(description.to_string()),
            None => violations.push(DESCRIPTION_RULE.to_string()),
        }
    }

    if checked("price") {
        match to_price(value("price")) {
            Some(price) if price >= 0.0 => changes.price = Some(price),
            _ => violations.push(PRICE_RULE.to_string()),
        }
    }

    if checked("category") {
        match to_text(value("category")) {
            Some(category) => changes.category = Some(category.to_string()),
            None => violations.push(CATEGORY_RULE.to_string()),
        }
    }

    if let Some(raw) = payload.get("inStock") {
        match to_in_stock(raw) {
            Some(in_stock) => changes.in_stock = Some(in_stock),
            None => violations.push(IN_STOCK_RULE.to_string()),
        }
    }

    if violations.is_empty() {
        Ok(changes)
    } else {
        Err(ValidationErrors { violations })
    }
}

fn missing_rules(changes: &ProductChanges) -> Vec<String> {
    let mut rules = Vec::new();
    if changes.name.is_none() {
        rules.push(NAME_RULE.to_string());
    }
    if changes.description.is_none() {
        rules.push(DESCRIPTION_RULE.to_string());
    }
    if changes.price.is_none() {
        rules.push(PRICE_RULE.to_string());
    }
    if changes.category.is_none() {
        rules.push(CATEGORY_RULE.to_string());
    }
    rules
}
