//! NTCIR形式の特許文書からの構造抽出
//!
//! このモジュールは、NTCIRフォーマット（`<SDO xxJ>...</SDO>`形式のフィールドタグと
//! `【...】`形式の和文ラベルを持つタグ付きテキスト）の特許文書を対象に、
//! 以下の構造抽出機能を提供します。
//!
//! - フィールド（要約・特許請求の範囲・発明の詳細な説明・符号の説明）の抽出
//! - 請求項単位・文単位・段落単位への分割
//! - 「発明の効果」セクションの段落抽出
//!
//! フィールドやセクションが文書に存在しない場合は空の結果を返します。
//! 欠落は正常なデータとして扱われ、エラーにはなりません。

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{Result, TokkyoError};

/// 「発明の効果」セクションのラベル
const EFFECT_LABEL: &str = "【発明の効果】";

/// 要約フィールドのパターン
static AB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<SDO ABJ>(.+?)</SDO>").unwrap());

/// 特許請求の範囲フィールドのパターン
static CL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<SDO CLJ>(.+?)</SDO>").unwrap());

/// 発明の詳細な説明フィールドのパターン
static DE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<SDO DEJ>(.+?)</SDO>").unwrap());

/// 符号の説明のパターン（ラベルの直後から、次のラベルの手前まで）
static ES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("【符号の説明】([^【]+)").unwrap());

/// 請求項マーカー `【請求項N】` のパターン
static CLAIM_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"【請求項\d+】").unwrap());

/// 句点 `。` で終わる文のパターン
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?s).+?。").unwrap());

/// 句点と改行 `。\n` で終わる段落のパターン
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new("(?s).*?。\n").unwrap());

/// 4桁の段落番号タグ `【NNNN】` で始まるかを判定するパターン
static PARAGRAPH_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^【\d{4}】").unwrap());

/// NTCIR文書のフィールド
///
/// 文書はフィールドごとに高々1つの内容を持ちます。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// 要約（`<SDO ABJ>`）
    Ab,

    /// 特許請求の範囲（`<SDO CLJ>`）
    Cl,

    /// 発明の詳細な説明（`<SDO DEJ>`）
    De,

    /// 符号の説明（`【符号の説明】`）
    Es,
}

/// `Field` の `FromStr` 実装
impl FromStr for Field {
    type Err = TokkyoError;

    /// 文字列からフィールドをパースする
    ///
    /// # 引数
    ///
    /// * `field` - パース対象の文字列（"ab"、"cl"、"de"、"es"のいずれか）
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `Field`、
    /// 認識できないフィールド名の場合は[`InvalidArgumentError`](crate::errors::InvalidArgumentError)
    fn from_str(field: &str) -> Result<Self> {
        match field {
            "ab" => Ok(Self::Ab),
            "cl" => Ok(Self::Cl),
            "de" => Ok(Self::De),
            "es" => Ok(Self::Es),
            _ => Err(TokkyoError::invalid_argument(
                "field",
                format!("must be one of ab, cl, de, and es, but got {field}"),
            )),
        }
    }
}

impl Field {
    /// NTCIR文書からこのフィールドの内容を抽出します。
    ///
    /// フィールドが文書に存在しない場合は空文字列を返します。
    ///
    /// # 引数
    ///
    /// * `doc` - 特許のテキストデータ
    ///
    /// # 戻り値
    ///
    /// 指定したフィールドのテキストデータ
    pub fn extract(self, doc: &str) -> String {
        let pattern = match self {
            Self::Ab => &AB_PATTERN,
            Self::Cl => &CL_PATTERN,
            Self::De => &DE_PATTERN,
            Self::Es => &ES_PATTERN,
        };
        pattern
            .captures(doc)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

/// NTCIRフォーマットの特許文書から指定したフィールドの内容を抽出します。
///
/// # 引数
///
/// * `doc` - 特許のテキストデータ
/// * `field` - 取得したいフィールドの名前
///   - `"ab"` -> 要約
///   - `"cl"` -> 特許請求の範囲
///   - `"de"` -> 発明の詳細な説明
///   - `"es"` -> 符号の説明
///
/// # 戻り値
///
/// 指定したフィールドのテキストデータ。
/// フィールドが文書に存在しない場合は空文字列を返します。
///
/// # エラー
///
/// フィールド名が認識できない場合は
/// [`InvalidArgumentError`](crate::errors::InvalidArgumentError)が返されます。
/// これはデータのエラーではなく、呼び出し側のプログラミングエラーです。
///
/// # 例
///
/// ```
/// use tokkyo::ntcir::extract_field;
///
/// let doc = "<SDO ABJ>検索装置を提供する。</SDO>";
/// assert_eq!(extract_field(doc, "ab")?, "検索装置を提供する。");
/// assert_eq!(extract_field(doc, "cl")?, "");
/// assert!(extract_field(doc, "xx").is_err());
/// # Ok::<(), tokkyo::errors::TokkyoError>(())
/// ```
pub fn extract_field(doc: &str, field: &str) -> Result<String> {
    Ok(Field::from_str(field)?.extract(doc))
}

/// 「特許請求の範囲」のテキストを請求項ごとに分割します。
///
/// テキストを `【請求項N】` マーカーで区切り、各マーカーから次のマーカー
/// （最後の請求項は文字列の終端）までの部分文字列を文書内の出現順で返します。
/// マーカー自体は出力に含まれません。マーカーが見つからない場合は
/// 空のベクターを返します。
///
/// # 引数
///
/// * `raw_claims` - 「特許請求の範囲」のテキスト
///
/// # 戻り値
///
/// 請求項のリスト
///
/// # 例
///
/// ```
/// use tokkyo::ntcir::split_claims;
///
/// let claims = split_claims("【請求項1】第一の請求項【請求項2】第二の請求項");
/// assert_eq!(claims, vec!["第一の請求項", "第二の請求項"]);
/// ```
pub fn split_claims(raw_claims: &str) -> Vec<String> {
    // regexクレートは先読みを持たないため、マーカー位置の走査で分割する
    let markers: Vec<_> = CLAIM_MARKER.find_iter(raw_claims).collect();
    let mut claims = Vec::with_capacity(markers.len());
    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(raw_claims.len(), |m| m.start());
        claims.push(raw_claims[marker.end()..end].to_string());
    }
    claims
}

/// テキストを文単位に分割します。
///
/// 文は句点 `。` で終わる極大の非空文字列です。各文は前後の空白を
/// 除去した形で返されます。句点で終わらない末尾のテキストは
/// 不完全な文として破棄されます。
///
/// # 引数
///
/// * `text` - 分割対象のテキスト
///
/// # 戻り値
///
/// 文のリスト
///
/// # 例
///
/// ```
/// use tokkyo::ntcir::split_sentence;
///
/// assert_eq!(split_sentence("これはテスト。これも。"), vec!["これはテスト。", "これも。"]);
/// assert_eq!(split_sentence("完全な文。不完全な文"), vec!["完全な文。"]);
/// ```
pub fn split_sentence(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// テキストを段落単位に分割します。
///
/// 段落は句点と改行 `。\n` で終わる極大の文字列です。各段落は前後の空白を
/// 除去した形で返されます。`。\n` で終わらない末尾のテキストは破棄されます。
///
/// # 引数
///
/// * `text` - 分割対象のテキスト
///
/// # 戻り値
///
/// 段落のリスト
pub fn split_paragraph(text: &str) -> Vec<String> {
    PARAGRAPH
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// 「発明の効果」セクションの段落を抽出します。
///
/// ラベル `【発明の効果】` を探し、見つからない場合は空のベクターを返します。
/// ラベル以降のテキストを段落に分割し、最初の段落は無条件に保持します。
/// 2番目以降は、4桁の段落番号タグ `【NNNN】` で始まらない段落が現れた時点で
/// 走査を打ち切り、それ以前に集めた段落のみを返します。
/// 効果セクションの末尾には段落番号を持たない無関係な内容
/// （結果の一覧表など）が続くことがあり、この打ち切りによって除外されます。
///
/// # 引数
///
/// * `text` - 「発明の詳細な説明」など、効果セクションを含みうるテキスト
///
/// # 戻り値
///
/// 効果セクションの段落のリスト
pub fn extract_effect_paragraphs(text: &str) -> Vec<String> {
    let Some(pos) = text.find(EFFECT_LABEL) else {
        return vec![];
    };
    let sec_text = &text[pos + EFFECT_LABEL.len()..];

    let paragraphs = split_paragraph(sec_text);
    for (i, paragraph) in paragraphs.iter().enumerate().skip(1) {
        if !is_paragraph_tag(paragraph) {
            return paragraphs[..i].to_vec();
        }
    }
    paragraphs
}

/// テキストが4桁の段落番号タグ `【NNNN】` で始まるかを判定します。
///
/// # 引数
///
/// * `text` - 判定対象のテキスト
///
/// # 戻り値
///
/// 段落番号タグで始まる場合は `true`
pub fn is_paragraph_tag(text: &str) -> bool {
    PARAGRAPH_TAG.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_ab() {
        let doc = "<SDO ABJ>hello</SDO>";
        assert_eq!(extract_field(doc, "ab").unwrap(), "hello");
    }

    #[test]
    fn test_extract_field_missing() {
        let doc = "<SDO ABJ>hello</SDO>";
        assert_eq!(extract_field(doc, "cl").unwrap(), "");
        assert_eq!(extract_field(doc, "de").unwrap(), "");
        assert_eq!(extract_field(doc, "es").unwrap(), "");
    }

    #[test]
    fn test_extract_field_multiline() {
        let doc = "<SDO CLJ>一行目。\n二行目。\n</SDO>";
        assert_eq!(extract_field(doc, "cl").unwrap(), "一行目。\n二行目。\n");
    }

    #[test]
    fn test_extract_field_non_greedy() {
        let doc = "<SDO ABJ>first</SDO><SDO DEJ>second</SDO>";
        assert_eq!(extract_field(doc, "ab").unwrap(), "first");
        assert_eq!(extract_field(doc, "de").unwrap(), "second");
    }

    #[test]
    fn test_extract_field_es() {
        let doc = "【符号の説明】1 記憶部、2 制御部【図面の簡単な説明】図1";
        assert_eq!(extract_field(doc, "es").unwrap(), "1 記憶部、2 制御部");
    }

    #[test]
    fn test_extract_field_es_to_end() {
        let doc = "【符号の説明】1 記憶部";
        assert_eq!(extract_field(doc, "es").unwrap(), "1 記憶部");
    }

    #[test]
    fn test_extract_field_invalid_name() {
        let doc = "<SDO ABJ>hello</SDO>";
        assert!(extract_field(doc, "xx").is_err());
        assert!(extract_field("", "xx").is_err());
    }

    #[test]
    fn test_split_claims() {
        let claims = split_claims("【請求項1】First claim text【請求項2】Second claim text");
        assert_eq!(claims, vec!["First claim text", "Second claim text"]);
    }

    #[test]
    fn test_split_claims_multiline() {
        let claims = split_claims("【請求項1】装置であって、\n記憶部を備える。\n【請求項12】方法。");
        assert_eq!(claims, vec!["装置であって、\n記憶部を備える。\n", "方法。"]);
    }

    #[test]
    fn test_split_claims_no_marker() {
        assert!(split_claims("請求項のないテキスト").is_empty());
        assert!(split_claims("").is_empty());
    }

    #[test]
    fn test_split_sentence() {
        assert_eq!(
            split_sentence("これはテスト。これも。"),
            vec!["これはテスト。", "これも。"]
        );
    }

    #[test]
    fn test_split_sentence_drops_trailing() {
        assert_eq!(split_sentence("完全な文。不完全な文"), vec!["完全な文。"]);
        assert!(split_sentence("句点なし").is_empty());
    }

    #[test]
    fn test_split_sentence_trims() {
        assert_eq!(
            split_sentence("一文目。 二文目。"),
            vec!["一文目。", "二文目。"]
        );
    }

    #[test]
    fn test_split_paragraph() {
        assert_eq!(
            split_paragraph("【0001】第一段落。\n【0002】第二段落。\n"),
            vec!["【0001】第一段落。", "【0002】第二段落。"]
        );
    }

    #[test]
    fn test_split_paragraph_drops_trailing() {
        // 改行で終わらない末尾は段落として返さない
        assert_eq!(split_paragraph("第一段落。\n第二段落。"), vec!["第一段落。"]);
    }

    #[test]
    fn test_extract_effect_paragraphs() {
        let text = "【発明の効果】Intro text。\n【0001】First。\n Not tagged trailing text。\n";
        assert_eq!(
            extract_effect_paragraphs(text),
            vec!["Intro text。", "【0001】First。"]
        );
    }

    #[test]
    fn test_extract_effect_paragraphs_all_tagged() {
        let text = "前置き。\n【発明の効果】導入。\n【0008】効果一。\n【0009】効果二。\n";
        assert_eq!(
            extract_effect_paragraphs(text),
            vec!["導入。", "【0008】効果一。", "【0009】効果二。"]
        );
    }

    #[test]
    fn test_extract_effect_paragraphs_missing_label() {
        assert!(extract_effect_paragraphs("効果の記載なし。\n").is_empty());
    }

    #[test]
    fn test_is_paragraph_tag() {
        assert!(is_paragraph_tag("【0001】本文"));
        assert!(!is_paragraph_tag("【001】本文"));
        assert!(!is_paragraph_tag("本文【0001】"));
        assert!(!is_paragraph_tag("【請求項1】本文"));
    }
}
