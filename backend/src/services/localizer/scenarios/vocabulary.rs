//! Chinese -> Vietnamese e-commerce vocabulary table shared by every scenario.
//!
//! The "never" column is advisory: it is sent to the model as instructions,
//! the output is not checked against it.

pub struct VocabularyMapping {
    pub source: &'static str,
    pub context: Option<&'static str>,
    pub preferred: &'static [&'static str],
    pub never: Option<&'static str>,
}

pub const VOCABULARY: &[VocabularyMapping] = &[
    VocabularyMapping {
        source: "亲 / 亲爱的",
        context: None,
        preferred: &["Bạn ơi", "Khách yêu", "Tình yêu ơi"],
        never: Some("Thân ái"),
    },
    VocabularyMapping {
        source: "免运费",
        context: None,
        preferred: &["Freeship", "Miễn ship"],
        never: Some("Miễn phí vận chuyển"),
    },
    VocabularyMapping {
        source: "货到付款",
        context: None,
        preferred: &["COD", "Ship COD"],
        never: Some("Thanh toán khi nhận hàng"),
    },
    VocabularyMapping {
        source: "现货",
        context: None,
        preferred: &["Hàng có sẵn", "Sẵn kho"],
        never: None,
    },
    VocabularyMapping {
        source: "正品",
        context: None,
        preferred: &["Hàng Auth", "Chính hãng 100%"],
        never: None,
    },
    VocabularyMapping {
        source: "显瘦",
        context: Some("Clothing"),
        preferred: &["Hack dáng", "Tôn dáng"],
        never: Some("Trông gầy"),
    },
    VocabularyMapping {
        source: "透气",
        context: Some("Fabric"),
        preferred: &["Thoáng khí", "Thấm hút mồ hôi"],
        never: Some("Có thể thở"),
    },
    VocabularyMapping {
        source: "下单",
        context: None,
        preferred: &["Lên đơn", "Chốt đơn", "Săn ngay"],
        never: None,
    },
    VocabularyMapping {
        source: "优惠券",
        context: None,
        preferred: &["Voucher", "Mã giảm giá"],
        never: Some("Phiếu giảm giá"),
    },
];

/// Render the table as the numbered block embedded in each instruction.
pub fn render_vocabulary() -> String {
    let mut out =
        String::from("CRITICAL VOCABULARY MAPPING (Chinese -> Vietnamese E-commerce Slang):\n");
    for (i, entry) in VOCABULARY.iter().enumerate() {
        let preferred = entry
            .preferred
            .iter()
            .map(|term| format!("\"{}\"", term))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("{}. {}", i + 1, entry.source));
        if let Some(context) = entry.context {
            out.push_str(&format!(" ({})", context));
        }
        out.push_str(&format!(" -> {}", preferred));
        if let Some(never) = entry.never {
            out.push_str(&format!(" (NEVER use \"{}\")", never));
        }
        out.push('\n');
    }
    out
}
