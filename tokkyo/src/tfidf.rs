//! トークン辞書とTF-IDFモデル
//!
//! このモジュールは、品詞フィルタリング済みのトークン列からなるコーパスに対して、
//! トークンとIDの対応辞書およびTF-IDF統計モデルを構築する機能を提供します。
//! 辞書とモデルは対で永続化され、対で読み込まれることを想定しています。
//!
//! 重み付けの定義:
//!
//! - idf(t) = log2(N / df(t))  （N: 文書数、df(t): トークンtの文書頻度）
//! - 文書ベクトルの各重みは tf·idf をL2ノルムで正規化した値

use std::io::{Read, Write};

use bincode::{Decode, Encode};
use hashbrown::{HashMap, HashSet};

use crate::common;
use crate::errors::{Result, TokkyoError};

/// 辞書ファイルのマジックナンバー
const DICTIONARY_MAGIC: &[u8] = b"tokkyo-dict\0";

/// モデルファイルのマジックナンバー
const MODEL_MAGIC: &[u8] = b"tokkyo-tfidf\0";

/// 永続化される辞書データ
#[derive(Default, Debug, Encode, Decode)]
struct DictionaryData {
    id2token: Vec<String>,
    dfs: Vec<u32>,
    num_docs: u32,
}

/// トークンとIDの対応辞書
///
/// 各トークンに出現順で密なIDを割り当て、トークンごとの文書頻度と
/// 文書数を保持します。
///
/// # 例
///
/// ```
/// use tokkyo::tfidf::Dictionary;
///
/// let docs = vec![
///     vec!["装置".to_string(), "記憶".to_string()],
///     vec!["装置".to_string()],
/// ];
/// let dict = Dictionary::from_documents(&docs)?;
/// assert_eq!(dict.num_docs(), 2);
/// assert_eq!(dict.num_tokens(), 2);
/// assert_eq!(dict.doc2bow(&docs[0]), vec![(0, 1), (1, 1)]);
/// # Ok::<(), tokkyo::errors::TokkyoError>(())
/// ```
#[derive(Default, Debug)]
pub struct Dictionary {
    data: DictionaryData,
    token2id: HashMap<String, u32>,
}

impl Dictionary {
    /// 新しい空の辞書を生成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 文書の集合から辞書を構築します。
    ///
    /// # 引数
    ///
    /// * `docs` - 文書のリスト。各文書はトークンのリスト
    ///
    /// # 戻り値
    ///
    /// 構築された辞書
    ///
    /// # エラー
    ///
    /// 異なりトークン数が[`u32::MAX`]を超えた場合はエラーが返されます。
    pub fn from_documents<D>(docs: &[D]) -> Result<Self>
    where
        D: AsRef<[String]>,
    {
        let mut dict = Self::new();
        for doc in docs {
            dict.add_document(doc.as_ref())?;
        }
        Ok(dict)
    }

    /// 1つの文書を辞書に追加します。
    ///
    /// 未知のトークンには新しいIDが割り当てられ、文書頻度と文書数が
    /// 更新されます。
    ///
    /// # 引数
    ///
    /// * `tokens` - 文書のトークン列
    ///
    /// # エラー
    ///
    /// 異なりトークン数が[`u32::MAX`]を超えた場合はエラーが返されます。
    pub fn add_document(&mut self, tokens: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for token in tokens {
            let id = match self.token2id.get(token) {
                Some(&id) => id,
                None => {
                    let id = u32::try_from(self.data.id2token.len())?;
                    self.data.id2token.push(token.clone());
                    self.data.dfs.push(0);
                    self.token2id.insert(token.clone(), id);
                    id
                }
            };
            if seen.insert(id) {
                self.data.dfs[id as usize] += 1;
            }
        }
        self.data.num_docs += 1;
        Ok(())
    }

    /// 文書をbag-of-words表現に変換します。
    ///
    /// 辞書に登録されていないトークンは無視されます。
    ///
    /// # 引数
    ///
    /// * `tokens` - 文書のトークン列
    ///
    /// # 戻り値
    ///
    /// `(トークンID, 出現回数)` のリスト（ID昇順）
    pub fn doc2bow(&self, tokens: &[String]) -> Vec<(u32, u32)> {
        let mut counts = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.token2id.get(token) {
                *counts.entry(id).or_insert(0u32) += 1;
            }
        }
        let mut bow: Vec<_> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }

    /// 登録されているトークン数を返します。
    pub fn num_tokens(&self) -> usize {
        self.data.id2token.len()
    }

    /// 追加された文書数を返します。
    pub fn num_docs(&self) -> u32 {
        self.data.num_docs
    }

    /// IDに対応するトークンを返します。
    pub fn token(&self, id: u32) -> Option<&str> {
        self.data.id2token.get(id as usize).map(String::as_str)
    }

    /// トークンに対応するIDを返します。
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token2id.get(token).copied()
    }

    /// IDに対応する文書頻度を返します。
    pub fn df(&self, id: u32) -> Option<u32> {
        self.data.dfs.get(id as usize).copied()
    }

    /// トークンごとの文書頻度を返します。
    pub(crate) fn dfs(&self) -> &[u32] {
        &self.data.dfs
    }

    /// 辞書をライターに書き出します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先のライター
    ///
    /// # エラー
    ///
    /// I/Oまたはbincodeがエラーを生成した場合、そのエラーがそのまま返されます。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(DICTIONARY_MAGIC)?;
        bincode::encode_into_std_write(&self.data, &mut wtr, common::bincode_config())?;
        Ok(())
    }

    /// リーダーから辞書を読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 辞書データを読み込むリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれた辞書オブジェクト
    ///
    /// # エラー
    ///
    /// bincodeがエラーを生成した場合、そのエラーがそのまま返されます。
    /// また、マジックナンバーが一致しない場合もエラーが返されます。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; DICTIONARY_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != DICTIONARY_MAGIC {
            return Err(TokkyoError::invalid_argument(
                "rdr",
                "The magic number of the input dictionary mismatches.",
            ));
        }
        let data: DictionaryData =
            bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        let token2id = data
            .id2token
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id as u32))
            .collect();
        Ok(Self { data, token2id })
    }
}

/// TF-IDFモデル
///
/// 辞書の文書頻度から各トークンのidfを保持し、bag-of-words表現を
/// TF-IDF重みベクトルに変換します。
///
/// # 例
///
/// ```
/// use tokkyo::tfidf::{Dictionary, TfidfModel};
///
/// let docs = vec![
///     vec!["装置".to_string(), "記憶".to_string()],
///     vec!["装置".to_string()],
/// ];
/// let dict = Dictionary::from_documents(&docs)?;
/// let model = TfidfModel::fit(&dict);
///
/// // 「装置」は全文書に出現するため重みを持たない
/// let weights = model.transform(&dict.doc2bow(&docs[0]));
/// assert_eq!(weights.len(), 1);
/// assert_eq!(weights[0].0, dict.id("記憶").unwrap());
/// # Ok::<(), tokkyo::errors::TokkyoError>(())
/// ```
#[derive(Debug, Encode, Decode)]
pub struct TfidfModel {
    idfs: Vec<f64>,
    num_docs: u32,
}

impl TfidfModel {
    /// 辞書の文書頻度からモデルを学習します。
    ///
    /// # 引数
    ///
    /// * `dict` - 構築済みの辞書
    ///
    /// # 戻り値
    ///
    /// 学習されたモデル
    pub fn fit(dict: &Dictionary) -> Self {
        let num_docs = dict.num_docs();
        let n = f64::from(num_docs);
        let idfs = dict
            .dfs()
            .iter()
            .map(|&df| if df == 0 { 0.0 } else { (n / f64::from(df)).log2() })
            .collect();
        Self { idfs, num_docs }
    }

    /// bag-of-words表現をTF-IDF重みベクトルに変換します。
    ///
    /// 各重みは tf·idf をL2ノルムで正規化した値です。重みが0のエントリ
    /// （全文書に出現するトークンなど）は出力から除外されます。
    ///
    /// # 引数
    ///
    /// * `bow` - [`Dictionary::doc2bow`]が返す `(トークンID, 出現回数)` のリスト
    ///
    /// # 戻り値
    ///
    /// `(トークンID, 重み)` のリスト（ID昇順）
    pub fn transform(&self, bow: &[(u32, u32)]) -> Vec<(u32, f64)> {
        let mut weights: Vec<(u32, f64)> = bow
            .iter()
            .filter_map(|&(id, tf)| {
                let idf = *self.idfs.get(id as usize)?;
                let weight = f64::from(tf) * idf;
                (weight != 0.0).then_some((id, weight))
            })
            .collect();
        let norm = weights
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= norm;
            }
        }
        weights
    }

    /// IDに対応するidfを返します。
    pub fn idf(&self, id: u32) -> Option<f64> {
        self.idfs.get(id as usize).copied()
    }

    /// 学習に使用した文書数を返します。
    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    /// モデルをライターに書き出します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先のライター
    ///
    /// # エラー
    ///
    /// I/Oまたはbincodeがエラーを生成した場合、そのエラーがそのまま返されます。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        bincode::encode_into_std_write(self, &mut wtr, common::bincode_config())?;
        Ok(())
    }

    /// リーダーからモデルを読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - モデルデータを読み込むリーダー
    ///
    /// # 戻り値
    ///
    /// 読み込まれたモデルオブジェクト
    ///
    /// # エラー
    ///
    /// bincodeがエラーを生成した場合、そのエラーがそのまま返されます。
    /// また、マジックナンバーが一致しない場合もエラーが返されます。
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(TokkyoError::invalid_argument(
                "rdr",
                "The magic number of the input model mismatches.",
            ));
        }
        let model = bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        Ok(model)
    }
}
