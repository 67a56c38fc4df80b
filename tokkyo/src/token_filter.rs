//! 品詞によるトークンのフィルタリング
//!
//! このモジュールは、形態素解析済みのトークンレコードを品詞の許可リストで
//! 選別する機能を提供します。トークンレコードは `表層形###品詞1,品詞2,...` の
//! 形式でエンコードされた文字列です。

use hashbrown::HashSet;

/// トークンレコード内で表層形と品詞列を区切るセパレータ
pub const TOKEN_SEPARATOR: &str = "###";

/// 品詞の許可リストに基づくトークンフィルタ
///
/// トークンレコードの品詞列の先頭セグメント（最初のカンマまで）が
/// 許可リストのいずれかと完全一致する場合にのみ、表層形を残します。
///
/// # 例
///
/// ```
/// use tokkyo::token_filter::PosFilter;
///
/// let filter = PosFilter::new(["名詞"]);
/// let tokens = ["猫###名詞,一般,*", "走る###動詞,自立,*", "malformed"];
/// assert_eq!(filter.filter(tokens), vec!["猫"]);
/// ```
#[derive(Clone, Debug)]
pub struct PosFilter {
    allowed: HashSet<String>,
}

impl PosFilter {
    /// 新しいフィルタを生成します。
    ///
    /// # 引数
    ///
    /// * `pos` - 許可する品詞（大分類）のリスト
    ///
    /// # 戻り値
    ///
    /// 生成されたフィルタ
    pub fn new<I, S>(pos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: pos.into_iter().map(Into::into).collect(),
        }
    }

    /// トークンレコード列をフィルタリングし、表層形のリストを返します。
    ///
    /// 入力の順序と重複は保持されます。セパレータ `###` を持たない
    /// 不正なレコードは、上流の解析器の不具合を許容するため、
    /// エラーにせず黙って読み飛ばされます。
    ///
    /// # 引数
    ///
    /// * `tokens` - `表層形###品詞1,品詞2,...` 形式のトークンレコード列
    ///
    /// # 戻り値
    ///
    /// 許可リストにマッチしたトークンの表層形のリスト
    pub fn filter<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filtered = vec![];
        for token in tokens {
            let Some((surface, pos)) = token.as_ref().split_once(TOKEN_SEPARATOR) else {
                continue;
            };
            let head = pos.split(',').next().unwrap_or(pos);
            if self.allowed.contains(head) {
                filtered.push(surface.to_string());
            }
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter() {
        let filter = PosFilter::new(["名詞"]);
        let tokens = ["猫###名詞,一般,*", "走る###動詞,自立,*", "malformed"];
        assert_eq!(filter.filter(tokens), vec!["猫"]);
    }

    #[test]
    fn test_filter_multiple_pos() {
        let filter = PosFilter::new(["名詞", "動詞"]);
        let tokens = ["猫###名詞,一般,*", "走る###動詞,自立,*", "の###助詞,連体化,*"];
        assert_eq!(filter.filter(tokens), vec!["猫", "走る"]);
    }

    #[test]
    fn test_filter_preserves_order_and_multiplicity() {
        let filter = PosFilter::new(["名詞"]);
        let tokens = ["猫###名詞,一般", "犬###名詞,一般", "猫###名詞,一般"];
        assert_eq!(filter.filter(tokens), vec!["猫", "犬", "猫"]);
    }

    #[test]
    fn test_filter_requires_exact_head_segment() {
        let filter = PosFilter::new(["名詞"]);
        // 先頭セグメントの前方一致ではなく完全一致
        assert!(filter.filter(["接頭###名詞接続,一般"]).is_empty());
        // 品詞列がカンマで始まるレコードは許可しない
        assert!(filter.filter(["空###,一般"]).is_empty());
    }

    #[test]
    fn test_filter_malformed_records() {
        let filter = PosFilter::new(["名詞"]);
        assert!(filter.filter(["separator-less", ""]).is_empty());
    }

    #[test]
    fn test_filter_empty_allow_list() {
        let filter = PosFilter::new(Vec::<String>::new());
        assert!(filter.filter(["猫###名詞,一般,*"]).is_empty());
    }
}
