/// Catalog listing order.
///
/// Sort keys arrive as free-form query strings; anything unrecognized falls
/// back to newest-first (`IdDesc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductSort {
    IdAsc,
    #[default]
    IdDesc,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl ProductSort {
    pub fn from_key(key: &str) -> Self {
        match key {
            "id_asc" => Self::IdAsc,
            "id_desc" => Self::IdDesc,
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            "stock_asc" => Self::StockAsc,
            "stock_desc" => Self::StockDesc,
            _ => Self::default(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::IdAsc => "id_asc",
            Self::IdDesc => "id_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::StockAsc => "stock_asc",
            Self::StockDesc => "stock_desc",
        }
    }
}
