//! Product catalog: the read-only list of purchasable items.
//!
//! The catalog is seeded once at startup and never mutated by the register.
//! Lookups treat product ids and skus case-insensitively, because scanned
//! codes arrive in whatever case the scanner firmware produces.
//!
//! Stock counts are advisory. They drive the Low/Few badges on the product
//! grid and a warning log on over-add, but never block a sale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stock at or below this count shows the "Low" badge.
const LOW_STOCK_MAX: u32 = 10;

/// Stock at or below this count (but above low) shows the "Few" badge.
const FEW_STOCK_MAX: u32 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Shelf categories of the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Prescription,
    #[serde(rename = "OTC")]
    Otc,
    Supplements,
    Devices,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prescription,
        Category::Otc,
        Category::Supplements,
        Category::Devices,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Prescription => "Prescription",
            Category::Otc => "OTC",
            Category::Supplements => "Supplements",
            Category::Devices => "Devices",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory stock badge for a product tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Few,
    Normal,
}

impl StockLevel {
    /// The grid badge text, if any ("Low" / "Few").
    pub fn badge(self) -> Option<&'static str> {
        match self {
            StockLevel::Low => Some("Low"),
            StockLevel::Few => Some("Few"),
            StockLevel::Normal => None,
        }
    }
}

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub strength: String,
    pub form: String,
    pub category: Category,
    pub requires_prescription: bool,
    pub unit_price: Decimal,
    pub stock_quantity: u32,
    /// Scan code. May be empty for items without a printed barcode.
    pub sku: String,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        if self.stock_quantity <= LOW_STOCK_MAX {
            StockLevel::Low
        } else if self.stock_quantity <= FEW_STOCK_MAX {
            StockLevel::Few
        } else {
            StockLevel::Normal
        }
    }
}

/// Catalog construction failures. These indicate malformed seed data and
/// are surfaced at the boundary, never from cart logic.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product with empty id")]
    EmptyId,
    #[error("duplicate product id `{0}`")]
    DuplicateId(String),
    #[error("duplicate sku `{sku}` on product `{id}`")]
    DuplicateSku { id: String, sku: String },
    #[error("negative unit price on product `{0}`")]
    NegativePrice(String),
}

/// The seeded, read-only product list with case-insensitive id/sku indexes.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    by_sku: HashMap<String, usize>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl Catalog {
    /// Build a catalog, validating id/sku uniqueness and price sign.
    ///
    /// Ids and skus that differ only in case count as duplicates, since
    /// scan lookup is case-insensitive. Empty skus are allowed and simply
    /// not indexed.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut by_sku = HashMap::with_capacity(products.len());

        for (idx, product) in products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if product.unit_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if by_id.insert(product.id.to_lowercase(), idx).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !product.sku.is_empty()
                && by_sku.insert(product.sku.to_lowercase(), idx).is_some()
            {
                return Err(CatalogError::DuplicateSku {
                    id: product.id.clone(),
                    sku: product.sku.clone(),
                });
            }
        }

        Ok(Self {
            products,
            by_id,
            by_sku,
        })
    }

    /// Look up a product by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id
            .get(&id.to_lowercase())
            .map(|&idx| &self.products[idx])
    }

    /// Resolve a scanned code against sku first, then id, case-insensitively.
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        let key = code.to_lowercase();
        self.by_sku
            .get(&key)
            .or_else(|| self.by_id.get(&key))
            .map(|&idx| &self.products[idx])
    }

    /// Product-grid view: items in `category` whose name contains `query`
    /// (case-insensitive). An empty query matches the whole category.
    pub fn browse(&self, category: Category, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category == category && p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Search-box view: items whose name or sku contains `query`
    /// (case-insensitive). Blank queries return nothing rather than
    /// everything.
    pub fn quick_search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Demo seed
// ---------------------------------------------------------------------------

fn product(
    id: &str,
    name: &str,
    strength: &str,
    form: &str,
    category: Category,
    requires_prescription: bool,
    unit_price: Decimal,
    stock_quantity: u32,
    sku: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        strength: strength.to_string(),
        form: form.to_string(),
        category,
        requires_prescription,
        unit_price,
        stock_quantity,
        sku: sku.to_string(),
    }
}

/// The built-in demo shelf used by the demo binary and tests.
pub fn demo_products() -> Vec<Product> {
    use Category::{Devices, Otc, Prescription, Supplements};

    vec![
        product(
            "m1",
            "Amoxicillin",
            "500 mg",
            "Capsule",
            Prescription,
            true,
            Decimal::new(1250, 2),
            120,
            "AMX-500-CAP",
        ),
        product(
            "m2",
            "Paracetamol",
            "500 mg",
            "Tablet",
            Otc,
            false,
            Decimal::new(399, 2),
            280,
            "PCM-500-TAB",
        ),
        product(
            "m3",
            "Ibuprofen",
            "200 mg",
            "Tablet",
            Otc,
            false,
            Decimal::new(450, 2),
            160,
            "IBU-200-TAB",
        ),
        product(
            "m4",
            "Azithromycin",
            "250 mg",
            "Tablet",
            Prescription,
            true,
            Decimal::new(1599, 2),
            60,
            "AZM-250-TAB",
        ),
        product(
            "m5",
            "Vitamin C",
            "1000 mg",
            "Effervescent",
            Supplements,
            false,
            Decimal::new(599, 2),
            95,
            "VITC-1K-EFF",
        ),
        product(
            "m6",
            "Blood Glucose Strips",
            "50 pcs",
            "Strips",
            Devices,
            false,
            Decimal::new(1799, 2),
            40,
            "BGS-50",
        ),
        product(
            "m7",
            "Cough Syrup",
            "100 ml",
            "Syrup",
            Otc,
            false,
            Decimal::new(675, 2),
            70,
            "COF-100-SYR",
        ),
        product(
            "m8",
            "Insulin",
            "100 IU/ml",
            "Vial",
            Prescription,
            true,
            Decimal::new(2200, 2),
            25,
            "INS-100-VIAL",
        ),
    ]
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    fn demo_catalog() -> Catalog {
        Catalog::new(demo_products()).expect("demo seed is valid")
    }

    #[test]
    fn demo_seed_builds_with_all_products() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 8);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn scan_lookup_matches_sku_case_insensitively() {
        let catalog = demo_catalog();
        let hit = catalog.find_by_code("pcm-500-tab").expect("sku should match");
        assert_eq!(hit.name, "Paracetamol");
    }

    #[test]
    fn scan_lookup_falls_back_to_product_id() {
        let catalog = demo_catalog();
        let hit = catalog.find_by_code("M8").expect("id should match");
        assert_eq!(hit.name, "Insulin");
        assert!(catalog.find_by_code("XYZ-404").is_none());
    }

    #[test]
    fn get_is_case_insensitive_on_id() {
        let catalog = demo_catalog();
        assert_eq!(catalog.get("m1").map(|p| p.name.as_str()), Some("Amoxicillin"));
        assert_eq!(catalog.get("M1").map(|p| p.name.as_str()), Some("Amoxicillin"));
        assert!(catalog.get("m99").is_none());
    }

    #[test]
    fn browse_filters_by_category_and_name() {
        let catalog = demo_catalog();

        let rx_shelf = catalog.browse(Category::Prescription, "");
        let names: Vec<&str> = rx_shelf.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Amoxicillin", "Azithromycin", "Insulin"]);

        let hits = catalog.browse(Category::Otc, "IBU");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ibuprofen");
    }

    #[test]
    fn quick_search_matches_name_or_sku_and_ignores_blank() {
        let catalog = demo_catalog();

        assert!(catalog.quick_search("").is_empty());
        assert!(catalog.quick_search("   ").is_empty());

        let by_name = catalog.quick_search("para");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "m2");

        let by_sku = catalog.quick_search("bgs");
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].name, "Blood Glucose Strips");
    }

    #[test]
    fn stock_levels_follow_thresholds() {
        let mut item = product(
            "p1",
            "Test",
            "1 mg",
            "Tablet",
            Category::Otc,
            false,
            Decimal::ONE,
            10,
            "T-000001",
        );
        assert_eq!(item.stock_level(), StockLevel::Low);
        assert_eq!(item.stock_level().badge(), Some("Low"));

        item.stock_quantity = 11;
        assert_eq!(item.stock_level(), StockLevel::Few);

        item.stock_quantity = 30;
        assert_eq!(item.stock_level(), StockLevel::Few);

        item.stock_quantity = 31;
        assert_eq!(item.stock_level(), StockLevel::Normal);
        assert_eq!(item.stock_level().badge(), None);
    }

    #[test]
    fn duplicate_ids_are_rejected_even_across_case() {
        let mut products = demo_products();
        let mut dup = products[0].clone();
        dup.id = "M1".to_string();
        dup.sku = "OTHER-SKU-1".to_string();
        products.push(dup);

        let err = Catalog::new(products).expect_err("duplicate id should fail");
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "M1"));
    }

    #[test]
    fn duplicate_skus_are_rejected() {
        let mut products = demo_products();
        let mut dup = products[0].clone();
        dup.id = "m9".to_string();
        products.push(dup);

        let err = Catalog::new(products).expect_err("duplicate sku should fail");
        assert!(matches!(err, CatalogError::DuplicateSku { .. }));
    }

    #[test]
    fn empty_skus_are_allowed_and_unindexed() -> TestResult {
        let mut products = demo_products();
        for p in products.iter_mut().take(2) {
            p.sku = String::new();
        }

        let catalog = Catalog::new(products)?;
        assert_eq!(catalog.len(), 8);
        assert!(catalog.find_by_code("AMX-500-CAP").is_none());
        assert!(catalog.find_by_code("m1").is_some());
        Ok(())
    }

    #[test]
    fn negative_prices_and_empty_ids_are_rejected() {
        let mut products = demo_products();
        products[3].unit_price = Decimal::new(-1, 2);
        let err = Catalog::new(products).expect_err("negative price should fail");
        assert!(matches!(err, CatalogError::NegativePrice(id) if id == "m4"));

        let mut products = demo_products();
        products[0].id = String::new();
        let err = Catalog::new(products).expect_err("empty id should fail");
        assert!(matches!(err, CatalogError::EmptyId));
    }
}
