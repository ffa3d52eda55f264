//! 許可された感情ラベルの語彙
//!
//! LLM が返す `emotion` はこの閉じた語彙でフィルタしてから表示・保存する。
//! 語彙はプロセス起動時に一度だけ作り、`Arc` で共有する（以後は不変）。

use std::collections::HashSet;

/// 組み込みの感情ラベル（韓国語）
pub const KOREAN_EMOTIONS: &[&str] = &[
    // 強い肯定
    "환희", "행복", "기쁨", "즐거움", "희열", "황홀경", "사랑", "감격", "벅참", "심쿵",
    "만족", "뿌듯함", "감사", "안도", "설렘", "평화로움", "편안함", "자부심", "희망", "기대",
    "흥분", "용기", "활기참", "신남", "만족스러움", "개운함",
    // 穏やかな肯定
    "좋음", "긍정", "가벼움", "흥미", "호기심", "포근함", "따뜻함", "상쾌함", "기대감", "희망적",
    // 中立
    "평온", "덤덤함", "흥미로움", "신중함", "중립", "무감정", "보통", "무관심", "냉정", "담담함",
    "걱정", "긴장", "당황", "피곤", "지침", "미묘함", "심심함", "무료함", "멍함", "정신 없음",
    "혼란", "어색함", "부끄러움", "민망함", "궁금함", "어리둥절", "귀찮음", "피로감", "허기짐",
    // 穏やかな否定
    "불안", "초조", "실망", "외로움", "서운함", "후회", "죄책감", "지루함", "권태", "공허함",
    "허무함", "무의미함", "의욕 없음", "의욕 상실", "무력감", "허탈함", "공백감", "답답함",
    "불만", "억울", "혼돈", "불확실", "걱정스러움", "조바심", "망설임", "씁쓸함",
    // 強い否定
    "슬픔", "우울", "짜증", "분노", "불행", "상처", "비참", "무기력", "고통", "억울함",
    "열등감", "시기심", "부러움", "답답",
    "절망", "절망감", "공포", "두려움", "혐오", "증오", "극심한 분노", "치욕", "수치심",
    "비통함", "고독",
];

/// 感情ラベルの閉じた語彙
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionVocabulary {
    terms: HashSet<String>,
}

impl EmotionVocabulary {
    /// 組み込みの韓国語語彙
    pub fn korean() -> Self {
        Self::from_terms(KOREAN_EMOTIONS.iter().copied())
    }

    /// 任意のラベル列から語彙を作る（前後の空白は除去、空は無視）
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// ソート済みのラベル一覧（表示・プロンプト用）
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.terms.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// カンマ区切りの感情文字列を語彙でフィルタする
    ///
    /// 各要素は前後の空白を除去し、空要素と語彙外の語は捨てる。
    /// 残った語は元の順序のまま `", "` で結合する（重複は残す）。
    pub fn sanitize(&self, raw: &str) -> String {
        raw.split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty() && self.contains(term))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for EmotionVocabulary {
    fn default() -> Self {
        Self::korean()
    }
}
