//! # Tokkyo
//!
//! Tokkyoは、NTCIR形式の特許文書コーパスを対象とした前処理・統計化ライブラリです。
//!
//! ## 概要
//!
//! このライブラリは、特許の生テキストからTF-IDFモデルを構築するまでの
//! バッチパイプラインの中核部分を提供します。
//!
//! - **正規化**: 文字幅・ハイフン・長音記号・チルダ・スペース・大文字小文字の正準化
//! - **クリーニング**: マークアップタグとセクションラベルの除去
//! - **構造抽出**: フィールド・請求項・文・段落・「発明の効果」セクションの抽出
//! - **品詞フィルタ**: 品詞タグの許可リストによるトークンの選別
//! - **TF-IDF**: トークン辞書とTF-IDFモデルの構築・永続化
//!
//! 形態素解析そのものは外部の解析器（vibratoなど）に委ねられており、
//! このライブラリは `表層形###品詞1,品詞2,...` 形式でエンコードされた
//! トークンレコードを受け取ります。
//!
//! すべての中核機能は純粋・同期・ステートレスであり、並行に呼び出しても
//! 安全です。正規表現パターンはプロセス全体で一度だけコンパイルされ、
//! 読み取り専用で共有されます。
//!
//! ## 使用例
//!
//! ```
//! use tokkyo::cleaner::clean;
//! use tokkyo::ntcir::{extract_field, split_sentence};
//! use tokkyo::token_filter::PosFilter;
//!
//! let doc = "<SDO ABJ>【要約】\n検 索 装置を提供する。\n</SDO>";
//!
//! let abstract_text = extract_field(doc, "ab")?;
//! let sentences = split_sentence(&clean(&abstract_text));
//! assert_eq!(sentences, vec!["検索装置を提供する。"]);
//!
//! let filter = PosFilter::new(["名詞"]);
//! let surfaces = filter.filter(["装置###名詞,一般,*", "提供###名詞,サ変接続,*"]);
//! assert_eq!(surfaces, vec!["装置", "提供"]);
//! # Ok::<(), tokkyo::errors::TokkyoError>(())
//! ```

/// 特許文書のクリーニング
pub mod cleaner;

/// 永続化の共通設定
pub mod common;

/// パイプライン設定の読み込み
pub mod config;

/// エラー型の定義
pub mod errors;

/// 文字正規化
pub mod normalizer;

/// NTCIR形式の構造抽出
pub mod ntcir;

/// トークン辞書とTF-IDFモデル
pub mod tfidf;

/// 品詞によるトークンのフィルタリング
pub mod token_filter;

#[cfg(test)]
mod tests;

// Re-exports
pub use cleaner::clean;
pub use config::PipelineConfig;
pub use normalizer::normalize;
pub use ntcir::Field;
pub use tfidf::{Dictionary, TfidfModel};
pub use token_filter::PosFilter;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
