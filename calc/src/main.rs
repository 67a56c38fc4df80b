//! 辞書とTF-IDFモデルを構築するユーティリティ
//!
//! このバイナリは、トークン化済みファイルを読み込み、品詞の許可リストで
//! トークンを選別した上で、トークン辞書とTF-IDFモデルを構築して
//! ファイルに書き出します。

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;

use tokkyo::config::PipelineConfig;
use tokkyo::tfidf::{Dictionary, TfidfModel};
use tokkyo::token_filter::PosFilter;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "calc", about = "Builds a token dictionary and a TF-IDF model")]
struct Args {
    /// Parameter file in YAML.
    #[clap(short = 'p', long)]
    param: PathBuf,
}

/// メイン関数
///
/// パラメータファイルの`calc`セクションに従って辞書とTF-IDFモデルを構築し、
/// それぞれのファイルに書き出します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let param = PipelineConfig::from_path(&args.param)?;
    let param = param.calc()?;

    eprintln!("Loading data...");
    let dataset = load_tokenized_file(&param.input, &param.pos)?;
    eprintln!("Number of documents: {}", dataset.len());

    eprintln!("Building the dictionary...");
    let dict = Dictionary::from_documents(&dataset)?;
    eprintln!("Number of unique tokens: {}", dict.num_tokens());

    eprintln!("Calculating idf...");
    let model = TfidfModel::fit(&dict);

    eprintln!("Saving files...");
    dict.write(BufWriter::new(File::create(&param.output_dict)?))?;
    model.write(BufWriter::new(File::create(&param.output_model)?))?;

    Ok(())
}

/// トークン化済みファイルを読み込み、品詞フィルタを適用する
///
/// 1行を1文書として読み込み、タブ区切りのトークンレコードを
/// 品詞の許可リストで選別します。
///
/// # 引数
///
/// * `path` - トークン化済みファイルのパス
/// * `pos` - 許可する品詞（大分類）のリスト
///
/// # 戻り値
///
/// 文書ごとの、フィルタリング済みトークンのリスト
fn load_tokenized_file(path: &Path, pos: &[String]) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let filter = PosFilter::new(pos.iter().cloned());

    let mut dataset = vec![];
    let rdr = BufReader::new(File::open(path)?);
    for line in rdr.lines() {
        let line = line?;
        dataset.push(filter.filter(line.trim().split('\t')));
    }
    Ok(dataset)
}
