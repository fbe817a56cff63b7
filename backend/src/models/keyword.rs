use serde::Serialize;
use utoipa::ToSchema;

/// Built-in Vietnamese e-commerce slang term with its Chinese meaning
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct KeywordPreset {
    pub term: &'static str,
    pub meaning: &'static str,
}

pub const KEYWORD_PRESETS: &[KeywordPreset] = &[
    KeywordPreset { term: "Freeship", meaning: "免运费" },
    KeywordPreset { term: "Chính hãng", meaning: "正品" },
    KeywordPreset { term: "Hàng có sẵn", meaning: "现货" },
    KeywordPreset { term: "Ship COD", meaning: "货到付款" },
    KeywordPreset { term: "Hack dáng", meaning: "显瘦 (服饰)" },
    KeywordPreset { term: "Thấm hút", meaning: "吸汗透气" },
    KeywordPreset { term: "Chốt đơn", meaning: "下单/成交" },
    KeywordPreset { term: "Voucher", meaning: "优惠券" },
    KeywordPreset { term: "Giá hủy diệt", meaning: "跳楼价" },
];

pub fn is_preset(term: &str) -> bool {
    KEYWORD_PRESETS.iter().any(|p| p.term == term)
}

/// Keyword chip as shown to the user
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct KeywordOption {
    pub term: String,
    /// Chinese meaning for presets, `None` for custom tags
    pub meaning: Option<String>,
    pub custom: bool,
    pub selected: bool,
}
