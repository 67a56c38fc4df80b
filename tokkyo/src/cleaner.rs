//! 特許文書のクリーニング
//!
//! このモジュールは、特許の生テキストからマークアップタグと
//! `【...】`形式のセクションラベルを取り除き、改行を除去した上で
//! [`normalizer`](crate::normalizer)による正規化を適用します。

use std::sync::LazyLock;

use regex::Regex;

use crate::normalizer;

/// `<SDO ABJ>`のような属性付きの開始・終了タグにマッチするパターン
static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[/A-Za-z\d=\s]+?>").unwrap());

/// `【要約】`のようなセクションラベルにマッチするパターン（非貪欲、行内のみ）
static LABELS: LazyLock<Regex> = LazyLock::new(|| Regex::new("【.+?】").unwrap());

/// 特許の生テキストをクリーニングします。
///
/// 処理は以下の順序で適用されます。タグ・ラベルの除去は改行の除去と
/// 正規化に先行しなければなりません。正規化のスペース除去処理が、
/// 削除済みの構造境界をまたいで働いてはいけないためです。
///
/// 1. マークアップタグの除去
/// 2. `【...】`形式のセクションラベルの除去
/// 3. 改行の除去
/// 4. [`normalizer::normalize`]による正規化
///
/// # 引数
///
/// * `raw_doc` - 特許の生テキストデータ
///
/// # 戻り値
///
/// 正規化された特許のテキストデータ
///
/// # 例
///
/// ```
/// use tokkyo::cleaner::clean;
///
/// let raw = "<SDO ABJ>【要約】\n検 索 装置を提供する。\n</SDO>";
/// assert_eq!(clean(raw), "検索装置を提供する。");
/// ```
pub fn clean(raw_doc: &str) -> String {
    let cleaned = TAGS.replace_all(raw_doc, "");
    let cleaned = LABELS.replace_all(&cleaned, "");
    let cleaned = cleaned.replace('\n', "");

    normalizer::normalize(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_tags() {
        assert_eq!(clean("<SDO ABJ>要約文。</SDO>"), "要約文。");
        assert_eq!(clean("<tag attr=1>本文</tag>"), "本文");
    }

    #[test]
    fn test_clean_labels() {
        assert_eq!(clean("【請求項1】装置。"), "装置。");
        assert_eq!(clean("【発明の詳細な説明】詳細。"), "詳細。");
    }

    #[test]
    fn test_clean_newlines() {
        assert_eq!(clean("一行目。\n二行目。\n"), "一行目。二行目。");
    }

    #[test]
    fn test_clean_applies_normalization() {
        assert_eq!(clean("<SDO DEJ>ＴＥＳＴ ﾃﾞｰﾀ</SDO>"), "testデータ");
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), "");
    }
}
