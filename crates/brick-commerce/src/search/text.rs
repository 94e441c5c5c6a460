//! Free-text search and related products.

use crate::catalog::Product;

/// Queries shorter than this (after trimming) match nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Products whose text contains every whitespace-separated token of
/// `query`, case-insensitively, in their original order.
///
/// The searched text is name, theme, category and description joined
/// together; tokens are plain substrings, not words.
pub fn search<'a, I>(products: I, query: &str) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    products
        .into_iter()
        .filter(|p| {
            let haystack = searchable_text(p);
            tokens.iter().all(|t| haystack.contains(t.as_str()))
        })
        .collect()
}

fn searchable_text(product: &Product) -> String {
    format!(
        "{} {} {} {}",
        product.name, product.theme, product.category, product.description
    )
    .to_lowercase()
}

/// Up to `limit` products sharing a theme or category with `id`, in
/// catalog order, excluding the product itself. Unknown ids give nothing.
pub fn related_to<'a>(products: &'a [Product], id: &str, limit: usize) -> Vec<&'a Product> {
    let Some(current) = products.iter().find(|p| p.id == id) else {
        return Vec::new();
    };

    products
        .iter()
        .filter(|p| p.id != current.id)
        .filter(|p| p.theme == current.theme || p.category == current.category)
        .take(limit)
        .collect()
}

/// Sort key folding case and common Latin diacritics, so that "Ávila"
/// sorts next to "avila" rather than after "z".
pub fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_tokens_match_across_fields() {
        let mut a = product("1", 100, 1);
        a.name = "Star Destroyer".into();
        a.theme = "Other".into();
        a.description = "A ship from the Wars saga".into();
        let mut b = product("2", 100, 1);
        b.name = "Star Fighter".into();
        b.theme = "Other".into();
        b.description = "No saga here".into();

        let products = [a, b];
        assert_eq!(ids(&search(&products, "Star Wars")), vec!["1"]);
        assert_eq!(ids(&search(&products, "  star  ")), vec!["1", "2"]);
    }

    #[test]
    fn test_substring_not_word() {
        let mut a = product("1", 100, 1);
        a.name = "Batmobile".into();
        let products = [a];
        assert_eq!(ids(&search(&products, "mobil")), vec!["1"]);
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let products = vec![product("1", 100, 1)];
        assert!(search(&products, "s").is_empty());
        assert!(search(&products, " t ").is_empty());
        assert!(search(&products, "").is_empty());
    }

    #[test]
    fn test_related_by_theme_or_category() {
        let a = product("1", 100, 1);
        let mut b = product("2", 100, 1);
        b.theme = "Marvel".into();
        let mut c = product("3", 100, 1);
        c.theme = "Marvel".into();
        c.category = "cars".into();
        let d = product("4", 100, 1);

        let products = vec![a, b, c, d];
        assert_eq!(ids(&related_to(&products, "1", 4)), vec!["2", "4"]);
        assert_eq!(ids(&related_to(&products, "1", 1)), vec!["2"]);
        assert_eq!(ids(&related_to(&products, "3", 4)), vec!["2"]);
    }

    #[test]
    fn test_related_unknown_id_is_empty() {
        let products = vec![product("1", 100, 1)];
        assert!(related_to(&products, "missing", 4).is_empty());
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Coliseo Romano"), "coliseo romano");
        assert_eq!(collation_key("Ávila"), "avila");
        assert_eq!(collation_key("Batcueva: Caja Sombría"), "batcueva: caja sombria");
    }
}
