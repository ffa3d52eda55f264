//! 日記分析プロンプト
//!
//! モデルには JSON オブジェクトだけを返すよう指示する。守られない応答は interpret 側で救済する。

use crate::domain::EmotionVocabulary;

const INSTRUCTION: &str = "\
당신은 일기 텍스트를 분석하고 JSON 객체만 반환하는 도우미입니다.
JSON은 'summary', 'emotion', 'solution'이라는 키만 포함해야 합니다.
JSON 외의 다른 설명, 인사 또는 텍스트는 포함하지 마십시오.
응답은 한국어로 해주세요.";

/// 日記テキストから分析用プロンプトを組み立てる
///
/// 語彙が与えられた場合は `emotion` に使えるラベル一覧も添える。
pub fn build_analysis_prompt(text: &str, vocabulary: Option<&EmotionVocabulary>) -> String {
    let mut prompt = String::from(INSTRUCTION);
    prompt.push('\n');
    if let Some(vocab) = vocabulary.filter(|v| !v.is_empty()) {
        prompt.push_str("'emotion'은 다음 목록에 있는 단어만 쉼표로 구분해 사용하세요: ");
        prompt.push_str(&vocab.sorted_terms().join(", "));
        prompt.push('\n');
    }
    prompt.push_str("\n일기 텍스트:\n");
    prompt.push_str(text);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_instruction_and_text() {
        let p = build_analysis_prompt("오늘은 비가 왔다.", None);
        assert!(p.starts_with("당신은 일기 텍스트를 분석하고"));
        assert!(p.contains("'summary', 'emotion', 'solution'"));
        assert!(p.ends_with("일기 텍스트:\n오늘은 비가 왔다."));
        assert!(!p.contains("다음 목록"));
    }

    #[test]
    fn test_prompt_lists_vocabulary() {
        let vocab = EmotionVocabulary::from_terms(["행복", "불안"]);
        let p = build_analysis_prompt("text", Some(&vocab));
        assert!(p.contains("불안, 행복"));
    }

    #[test]
    fn test_prompt_skips_empty_vocabulary() {
        let vocab = EmotionVocabulary::from_terms(Vec::<String>::new());
        let p = build_analysis_prompt("text", Some(&vocab));
        assert!(!p.contains("다음 목록"));
    }
}
