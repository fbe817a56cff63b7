//! Localization Scenarios
//!
//! One fixed instruction template per [`Scenario`]. Each template is a role,
//! the shared vocabulary table, a task line and the scenario rules.

pub mod vocabulary;

use once_cell::sync::Lazy;

use crate::models::Scenario;
use vocabulary::render_vocabulary;

pub struct ScenarioTemplate {
    pub role: &'static str,
    pub task: &'static str,
    pub rules: &'static str,
}

// ============================================================================
// Templates
// ============================================================================

const SEO_TITLE: ScenarioTemplate = ScenarioTemplate {
    role: "You are an expert Shopee/Lazada Vietnam SEO copywriter.",
    task: "Translate/Rewrite the Chinese product title into a high-ranking Vietnamese SEO title.",
    rules: r#"STRICT STRUCTURE RULE:
[Brand/Core Product Name] + [Model] + [Key Selling Point/Material] + [Target Audience/Usage]

REQUIREMENTS:
1. Length: Keep it between 100-120 characters.
2. Keywords: Prioritize high-volume search terms.
3. Formatting: Do NOT use quotation marks. Remove redundant adjectives.
4. Suffix: If the input implies a promotion, append " [Freeship]" or " [Có sẵn]" at the end.
5. Logic: Translate for search intent, not literal meaning.
6. PRESERVE terms listed in GLOSSARY."#,
};

const PRODUCT_DETAIL: ScenarioTemplate = ScenarioTemplate {
    role: "You are a Vietnamese e-commerce listing specialist (Copywriter).",
    task: r#"Transcreate the product description into a persuasive "Selling List"."#,
    rules: r#"TRANSFORMATION RULES:
1. Feature -> Benefit: Don't just list specs. Explain why it matters.
   (e.g., "Cotton material" -> "Vải Cotton mềm mại, thấm hút mồ hôi, an toàn cho da")
2. Format: Use these specific emojis for bullet points: ✅, ✨, 🔸.
3. Size Warning: ALWAYS add this tip at the end: "💡 Lưu ý: Kích thước Việt Nam có thể nhỏ hơn tiêu chuẩn Âu/Mỹ, vui lòng check bảng size hoặc inbox Shop tư vấn."
4. CTA: End with a Call to Action like "Mua ngay để nhận ưu đãi!" or "Số lượng có hạn, chốt đơn ngay!".
5. Units: Convert 'Jin' (斤) to kg/g. Remove Chinese Yuan symbols.
6. PRESERVE terms listed in GLOSSARY."#,
};

const CUSTOMER_SERVICE: ScenarioTemplate = ScenarioTemplate {
    role: "You are a polite, helpful, and warm Vietnamese Customer Support agent (Southern accent preferred).",
    task: "Translate the Chinese reply into natural, soft Vietnamese CS language.",
    rules: r#"TONE & FORMAT:
1. Opening: ALWAYS start with "Dạ chào bạn ạ," or "Dạ Shop chào anh/chị,".
2. Self-reference: Use "Shop" or "Bên em". Refer to customer as "Bạn", "Khách", or "Tình yêu".
3. Softening: If refusing (e.g., no stock, no refund), apologize profusely and offer an alternative. Never say "No" directly.
4. Closing: ALWAYS end with "Shop cảm ơn ạ!" or "Inbox Shop để được hỗ trợ ngay nhé!".
5. PRESERVE terms listed in GLOSSARY."#,
};

const MARKETING: ScenarioTemplate = ScenarioTemplate {
    role: "You are a Vietnamese social media marketer (TikTok/Facebook).",
    task: "Rewrite the content into a viral, high-energy caption.",
    rules: r#"STYLE GUIDE:
1. Mood: FOMO (Fear Of Missing Out), Urgent, Exciting.
2. Power Words (Use these): "Sale sập sàn", "Giá hủy diệt", "Freeship đơn từ 0đ", "Hàng Hot Trend", "Duy nhất hôm nay".
3. Hashtags: Add 3-5 relevant hashtags at the bottom (e.g., #Shopee, #Sale, #OOTD).
4. Structure: Hook -> Key Benefit -> Urgency -> CTA.
5. PRESERVE terms listed in GLOSSARY."#,
};

pub fn template(scenario: Scenario) -> &'static ScenarioTemplate {
    match scenario {
        Scenario::SeoTitle => &SEO_TITLE,
        Scenario::ProductDetail => &PRODUCT_DETAIL,
        Scenario::CustomerService => &CUSTOMER_SERVICE,
        Scenario::Marketing => &MARKETING,
    }
}

// ============================================================================
// Rendering
// ============================================================================

static INSTRUCTIONS: Lazy<[String; 4]> = Lazy::new(|| {
    let vocabulary = render_vocabulary();
    Scenario::ALL.map(|scenario| render(template(scenario), &vocabulary))
});

fn render(t: &ScenarioTemplate, vocabulary: &str) -> String {
    format!("{}\n\n{}\nTask: {}\n\n{}", t.role, vocabulary, t.task, t.rules)
}

/// System instruction for a scenario. Rendered once, identical on every call.
pub fn system_instruction(scenario: Scenario) -> &'static str {
    let idx = match scenario {
        Scenario::SeoTitle => 0,
        Scenario::ProductDetail => 1,
        Scenario::CustomerService => 2,
        Scenario::Marketing => 3,
    };
    &INSTRUCTIONS[idx]
}
