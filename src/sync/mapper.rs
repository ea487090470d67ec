//! Projection from the commerce product shape to the content-store record
//! shape. Pure; absent fields degrade to defaults instead of failing.

use crate::product::{CommerceProduct, ContentProduct, SyncMetadata};

/// Map a commerce product into its content-store representation.
///
/// Price is the first variant's first price amount (0 when absent); SKU
/// falls back from the first price's SKU to the first variant's SKU to "".
/// Metadata is left default; the caller stamps it just before pushing.
pub fn map_product(product: &CommerceProduct) -> ContentProduct {
    let first_variant = product.variants.first();
    let first_price = first_variant.and_then(|v| v.prices.first());

    let sku = first_price
        .and_then(|p| p.sku.clone())
        .or_else(|| first_variant.and_then(|v| v.sku.clone()))
        .unwrap_or_default();

    ContentProduct {
        id: None,
        name: product.title.clone(),
        description: product.description.clone().unwrap_or_default(),
        price: first_price.map(|p| p.amount).unwrap_or(0),
        slug: product.handle.clone().unwrap_or_default(),
        sku,
        medusa_reference_id: product.id.clone(),
        date_updated: product.updated_at,
        metadata: SyncMetadata::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ProductVariant, VariantPrice};

    fn bare_product(id: &str, title: &str) -> CommerceProduct {
        CommerceProduct {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            handle: None,
            variants: Vec::new(),
            updated_at: None,
            metadata: None,
        }
    }

    #[test]
    fn test_missing_price_and_sku_default() {
        let record = map_product(&bare_product("prod_01", "Mug"));
        assert_eq!(record.price, 0);
        assert_eq!(record.sku, "");
        assert_eq!(record.description, "");
        assert_eq!(record.slug, "");
        assert_eq!(record.medusa_reference_id, "prod_01");
    }

    #[test]
    fn test_maps_first_variant_first_price() {
        let mut product = bare_product("prod_02", "Shirt");
        product.description = Some("A shirt".to_string());
        product.handle = Some("shirt".to_string());
        product.variants = vec![
            ProductVariant {
                sku: Some("SHIRT-S".to_string()),
                prices: vec![
                    VariantPrice {
                        amount: 1900,
                        sku: Some("SHIRT-S-USD".to_string()),
                    },
                    VariantPrice {
                        amount: 1700,
                        sku: None,
                    },
                ],
            },
            ProductVariant {
                sku: Some("SHIRT-M".to_string()),
                prices: vec![VariantPrice {
                    amount: 2100,
                    sku: None,
                }],
            },
        ];

        let record = map_product(&product);
        assert_eq!(record.name, "Shirt");
        assert_eq!(record.price, 1900);
        assert_eq!(record.sku, "SHIRT-S-USD");
        assert_eq!(record.slug, "shirt");
    }

    #[test]
    fn test_sku_falls_back_to_variant_sku() {
        let mut product = bare_product("prod_03", "Hat");
        product.variants = vec![ProductVariant {
            sku: Some("HAT-1".to_string()),
            prices: vec![VariantPrice {
                amount: 900,
                sku: None,
            }],
        }];

        let record = map_product(&product);
        assert_eq!(record.sku, "HAT-1");
        assert_eq!(record.price, 900);
    }

    #[test]
    fn test_metadata_left_unstamped() {
        let record = map_product(&bare_product("prod_04", "Pen"));
        assert!(record.metadata.last_synced_at.is_none());
        assert!(record.metadata.sync_source.is_none());
    }
}
