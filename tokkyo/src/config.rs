//! パイプライン設定の読み込み
//!
//! このモジュールは、コーパスの前処理・形態素解析を行う`corpus`セクションと、
//! 辞書・TF-IDFモデルの構築を行う`calc`セクションからなる
//! YAML形式のパラメータファイルを読み込みます。
//!
//! ```yaml
//! corpus:
//!   input: data/patents.csv
//!   use_col: text
//!   sysdic: dict/system.dic.zst
//!   n_jobs: 4
//!   output: work/tokenized.txt
//! calc:
//!   input: work/tokenized.txt
//!   pos: [名詞]
//!   output_dict: work/patent.dict
//!   output_model: work/patent.tfidf
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Result, TokkyoError};

/// パイプライン全体のパラメータ
///
/// 各セクションは省略可能ですが、対応する処理を実行する時点で
/// 存在しなければエラーになります。
#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    corpus: Option<CorpusConfig>,
    calc: Option<CalcConfig>,
}

/// コーパスの前処理・形態素解析のパラメータ
#[derive(Debug, Deserialize)]
pub struct CorpusConfig {
    /// 入力コーパスのパス（`.txt`または`.csv`）
    pub input: PathBuf,

    /// CSV入力のときに使用する列の名前
    #[serde(default)]
    pub use_col: Option<String>,

    /// 形態素解析に使用するシステム辞書のパス（zstd圧縮）
    pub sysdic: PathBuf,

    /// 並列ワーカー数
    #[serde(default = "default_n_jobs")]
    pub n_jobs: usize,

    /// トークン化済みファイルの出力先
    pub output: PathBuf,
}

/// 辞書・TF-IDFモデル構築のパラメータ
#[derive(Debug, Deserialize)]
pub struct CalcConfig {
    /// トークン化済みファイルのパス
    pub input: PathBuf,

    /// 許可する品詞（大分類）のリスト
    #[serde(default = "default_pos")]
    pub pos: Vec<String>,

    /// 辞書の出力先
    pub output_dict: PathBuf,

    /// TF-IDFモデルの出力先
    pub output_model: PathBuf,
}

fn default_n_jobs() -> usize {
    1
}

fn default_pos() -> Vec<String> {
    vec!["名詞".to_string()]
}

impl PipelineConfig {
    /// パラメータファイルを読み込みます。
    ///
    /// # 引数
    ///
    /// * `path` - YAML形式のパラメータファイルのパス
    ///
    /// # 戻り値
    ///
    /// 読み込まれたパラメータ
    ///
    /// # エラー
    ///
    /// ファイルが開けない場合、またはYAMLのデシリアライズに失敗した場合は
    /// エラーが返されます。
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// リーダーからパラメータを読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - YAMLデータを読み込むリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたパラメータ
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_yaml::from_reader(rdr)?)
    }

    /// `corpus`セクションを取得します。
    ///
    /// # エラー
    ///
    /// セクションが存在しない場合は
    /// [`InvalidFormatError`](crate::errors::InvalidFormatError)が返されます。
    pub fn corpus(&self) -> Result<&CorpusConfig> {
        self.corpus.as_ref().ok_or_else(|| {
            TokkyoError::invalid_format("corpus", "the parameter file must have a corpus section")
        })
    }

    /// `calc`セクションを取得します。
    ///
    /// # エラー
    ///
    /// セクションが存在しない場合は
    /// [`InvalidFormatError`](crate::errors::InvalidFormatError)が返されます。
    pub fn calc(&self) -> Result<&CalcConfig> {
        self.calc.as_ref().ok_or_else(|| {
            TokkyoError::invalid_format("calc", "the parameter file must have a calc section")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAM_YAML: &str = "\
corpus:
  input: data/patents.csv
  use_col: text
  sysdic: dict/system.dic.zst
  n_jobs: 4
  output: work/tokenized.txt
calc:
  input: work/tokenized.txt
  pos:
    - 名詞
    - 動詞
  output_dict: work/patent.dict
  output_model: work/patent.tfidf
";

    #[test]
    fn test_config_full() {
        let config = PipelineConfig::from_reader(PARAM_YAML.as_bytes()).unwrap();
        let corpus = config.corpus().unwrap();
        assert_eq!(corpus.input, PathBuf::from("data/patents.csv"));
        assert_eq!(corpus.use_col.as_deref(), Some("text"));
        assert_eq!(corpus.n_jobs, 4);
        let calc = config.calc().unwrap();
        assert_eq!(calc.pos, vec!["名詞", "動詞"]);
    }

    #[test]
    fn test_config_defaults() {
        let yaml = "\
calc:
  input: work/tokenized.txt
  output_dict: work/patent.dict
  output_model: work/patent.tfidf
";
        let config = PipelineConfig::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(config.calc().unwrap().pos, vec!["名詞"]);
        assert!(config.corpus().is_err());
    }
}
