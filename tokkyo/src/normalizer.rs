//! 特許テキストの文字正規化
//!
//! このモジュールは、OCRやレガシーエンコーディングに由来する表記ゆれを
//! 一つの正準形に揃えるための正規化処理を提供します。処理内容は
//! mecab-ipadic-neologd推奨の正規化処理に準拠しています
//! (ref: <https://github.com/neologd/mecab-ipadic-neologd/wiki/Regexp.ja>)。
//!
//! 主な処理は以下の通りです:
//!
//! - ハイフン・長音記号・チルダの異体字の統一
//! - 全角・半角スペースの圧縮と、和文文字に隣接するスペースの除去
//! - NFKC互換正規化による文字幅の正準化（カタカナは全角、英数字・記号は半角）
//! - 英字の小文字化
//!
//! すべての正規化パターンはプロセス全体で一度だけコンパイルされ、
//! 読み取り専用で共有されます。

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// ハイフンの異体字（マイナス記号や各種ダッシュ）
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[˗֊‐‑‒–⁃⁻₋−]+").unwrap());

/// 長音記号の異体字（罫線や全角ダッシュなど、長音に見える字形）
static CHOONPUS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[﹣－ｰ—―─━ー]+").unwrap());

/// チルダの異体字
static TILDES: LazyLock<Regex> = LazyLock::new(|| Regex::new("[~∼∾〜〰～]").unwrap());

/// 半角・全角スペースの連続
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new("[ 　]+").unwrap());

/// 和文とみなす文字ブロック
///
/// CJK統合漢字、ひらがな、カタカナ、CJK記号と句読点、半角・全角形を含みます。
const WIDE_BLOCKS: &str = "\u{4E00}-\u{9FFF}\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{3000}-\u{303F}\u{FF00}-\u{FFEF}";

/// 基本ラテン文字のブロック
const BASIC_LATIN: &str = "\u{0000}-\u{007F}";

/// 和文文字同士に挟まれたスペース
static SPACE_BETWEEN_WIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("([{WIDE_BLOCKS}]) ([{WIDE_BLOCKS}])")).unwrap()
});

/// 和文文字とラテン文字に挟まれたスペース
static SPACE_WIDE_LATIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("([{WIDE_BLOCKS}]) ([{BASIC_LATIN}])")).unwrap()
});

/// ラテン文字と和文文字に挟まれたスペース
static SPACE_LATIN_WIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("([{BASIC_LATIN}]) ([{WIDE_BLOCKS}])")).unwrap()
});

/// テキストを正規化します。
///
/// 全域関数であり、どのような入力に対しても失敗しません。
/// 処理は以下の順序で適用されます。後段の処理は前段の正準形を前提とするため、
/// 順序を入れ替えてはいけません。
///
/// 1. 先頭・末尾の空白の除去
/// 2. ハイフン異体字の `-` への統一
/// 3. 長音記号異体字の `ー` への統一
/// 4. チルダ異体字の `〜` への統一
/// 5. スペースの圧縮と、和文文字に隣接するスペースの除去
/// 6. 曲がった引用符 `’` `”` の直立形への置換
/// 7. NFKC互換正規化（半角カナは全角に、全角英数字・記号は半角になる）
/// 8. 英字の小文字化
///
/// この関数は冪等です: `normalize(normalize(s)) == normalize(s)`。
///
/// # 引数
///
/// * `text` - 正規化対象のテキスト
///
/// # 戻り値
///
/// 正規化されたテキスト
///
/// # 例
///
/// ```
/// use tokkyo::normalizer::normalize;
///
/// assert_eq!(normalize("検 索 エンジン"), "検索エンジン");
/// assert_eq!(normalize("ｹﾞｰﾑ"), "ゲーム");
/// assert_eq!(normalize("ＡＢＣ１２３"), "abc123");
/// ```
pub fn normalize(text: &str) -> String {
    let s = text.trim();

    let s = HYPHENS.replace_all(s, "-");
    let s = CHOONPUS.replace_all(&s, "ー");
    let s = TILDES.replace_all(&s, "〜");

    let s = remove_extra_spaces(s.into_owned());
    let s = s.replace('’', "'").replace('”', "\"");

    let s: String = s.nfkc().collect();
    s.to_lowercase()
}

/// スペースの連続を1つの半角スペースに圧縮し、和文文字に隣接するスペースを除去する
///
/// 除去は隣接ペアがなくなるまで（不動点に達するまで）繰り返されます。
/// 1つのスペースを除去すると新たな隣接ペアが現れることがあるためです。
fn remove_extra_spaces(s: String) -> String {
    let mut s = SPACES.replace_all(&s, " ").into_owned();
    for pattern in [&SPACE_BETWEEN_WIDE, &SPACE_WIDE_LATIN, &SPACE_LATIN_WIDE] {
        while pattern.is_match(&s) {
            s = pattern.replace_all(&s, "$1$2").into_owned();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hyphens() {
        assert_eq!(normalize("−‐‑1"), "-1");
        assert_eq!(normalize("o–ring"), "o-ring");
    }

    #[test]
    fn test_normalize_choonpus() {
        assert_eq!(normalize("スーパー"), "スーパー");
        assert_eq!(normalize("ス―パ─"), "スーパー");
        assert_eq!(normalize("モーータdruー"), "モータdruー");
    }

    #[test]
    fn test_normalize_tildes() {
        assert_eq!(normalize("1～2"), "1〜2");
        assert_eq!(normalize("a∼b"), "a〜b");
    }

    #[test]
    fn test_normalize_widths() {
        // 半角カナは全角に、全角英数字・記号は半角になる
        assert_eq!(normalize("ﾃｽﾄ"), "テスト");
        assert_eq!(normalize("ﾊﾞｯﾃﾘｰ"), "バッテリー");
        assert_eq!(normalize("Ｒｕｓｔ０１"), "rust01");
        assert_eq!(normalize("（１）"), "(1)");
    }

    #[test]
    fn test_normalize_lowercase() {
        assert_eq!(normalize("PRML"), "prml");
    }

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize("検 索 エンジン"), "検索エンジン");
        assert_eq!(normalize("Rust 言語"), "rust言語");
        assert_eq!(normalize("言語 Rust"), "言語rust");
        assert_eq!(normalize("ＰＲＭＬ　　副　読　本"), "prml副読本");
        // ラテン文字同士のスペースは保持される
        assert_eq!(normalize("hello  world"), "hello world");
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(normalize("”a’"), "\"a'");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "ス―パ─　ＴＯＫＫＹＯ−１ ｶﾞｲﾄﾞ",
            "検 索 エンジン自作入門を 買 い ま し た!!!",
            "Coding the Matrix",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
