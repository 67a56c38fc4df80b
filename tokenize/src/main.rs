//! 特許コーパスの前処理と形態素解析を実行するユーティリティ
//!
//! このバイナリは、NTCIR形式の特許コーパスを読み込み、フィールド抽出・
//! クリーニング・文分割を行った上で形態素解析し、トークン化済みファイルを
//! 出力します。出力は1文書1行、トークンはタブ区切り、各トークンは
//! `表層形###品詞1,品詞2,...` 形式です。

use std::error::Error;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;

use clap::Parser;
use csv_core::ReadFieldResult;
use vibrato::tokenizer::worker::Worker;
use vibrato::{Dictionary, Tokenizer};

use tokkyo::cleaner;
use tokkyo::config::PipelineConfig;
use tokkyo::ntcir::{self, Field};
use tokkyo::token_filter::TOKEN_SEPARATOR;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Splits patent documents into morphemes")]
struct Args {
    /// Parameter file in YAML.
    #[clap(short = 'p', long)]
    param: PathBuf,
}

/// メイン関数
///
/// パラメータファイルの`corpus`セクションに従ってコーパスを前処理し、
/// 形態素解析の結果をトークン化済みファイルとして出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let param = PipelineConfig::from_path(&args.param)?;
    let param = param.corpus()?;

    eprintln!("Loading the corpus...");
    let patents = load_input_file(&param.input, param.use_col.as_deref())?;
    let docs: Vec<Vec<String>> = patents.iter().map(|raw| preprocess(raw)).collect();
    eprintln!("Number of patents: {}", docs.len());

    eprintln!("Loading the dictionary...");
    let reader = zstd::Decoder::new(File::open(&param.sysdic)?)?;
    let dict = Dictionary::read(reader)?;
    let tokenizer = Tokenizer::new(dict);

    eprintln!("Ready to tokenize");
    let tokenized = tokenize_docs(&tokenizer, &docs, param.n_jobs)?;

    let out = File::create(&param.output)?;
    let mut out = BufWriter::new(out);
    for (i, doc) in tokenized.iter().enumerate() {
        if i != 0 {
            out.write_all(b"\n")?;
        }
        out.write_all(doc.join("\t").as_bytes())?;
    }
    out.flush()?;

    Ok(())
}

/// 特許の生テキストを前処理して文のリストに変換する
///
/// 要約・特許請求の範囲・発明の詳細な説明の各フィールドを抽出して連結し、
/// クリーニングした上で文単位に分割します。
///
/// # 引数
///
/// * `raw_patent` - 特許の生テキストデータ
///
/// # 戻り値
///
/// 前処理済みの文のリスト
fn preprocess(raw_patent: &str) -> Vec<String> {
    let mut text = String::new();
    for field in [Field::Ab, Field::Cl, Field::De] {
        text.push_str(&field.extract(raw_patent));
    }
    ntcir::split_sentence(&cleaner::clean(&text))
}

/// 文書群を並列に形態素解析する
///
/// 文書群を`n_jobs`個のチャンクに分け、チャンクごとにスレッドを割り当てます。
/// [`Worker`]はスレッド間で共有できないため、各スレッドが自分のワーカーを
/// 生成します。結果の順序は入力の文書順と一致します。
///
/// # 引数
///
/// * `tokenizer` - 共有トークナイザー
/// * `docs` - 文書のリスト。各文書は前処理済みの文のリスト
/// * `n_jobs` - 並列ワーカー数
///
/// # 戻り値
///
/// 文書ごとのトークンレコードのリスト
fn tokenize_docs(
    tokenizer: &Tokenizer,
    docs: &[Vec<String>],
    n_jobs: usize,
) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let chunk_len = docs.len().div_ceil(n_jobs.max(1)).max(1);

    let chunks = thread::scope(|scope| {
        let handles: Vec<_> = docs
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut worker = tokenizer.new_worker();
                    chunk
                        .iter()
                        .map(|sentences| tokenize_doc(&mut worker, sentences))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| "a tokenization thread panicked")?;

    Ok(chunks.into_iter().flatten().collect())
}

/// 1つの文書を形態素解析してトークンレコードのリストに変換する
///
/// 文書内のすべての文のトークンを1つのリストにまとめます。
/// トークンが得られなかった文はその文についてのみ空の結果となり、
/// 処理全体は継続します。
fn tokenize_doc(worker: &mut Worker, sentences: &[String]) -> Vec<String> {
    let mut records = vec![];
    for sentence in sentences {
        worker.reset_sentence(sentence.as_str());
        worker.tokenize();
        if worker.num_tokens() == 0 && !sentence.is_empty() {
            log::warn!("Failed to tokenize: {sentence}");
            continue;
        }
        for i in 0..worker.num_tokens() {
            let token = worker.token(i);
            records.push(format!(
                "{}{}{}",
                token.surface(),
                TOKEN_SEPARATOR,
                token.feature()
            ));
        }
    }
    records
}

/// 入力コーパスを文書のリストとして読み込む
///
/// 拡張子が`.txt`の場合は1行を1文書として、`.csv`の場合は`use_col`で
/// 指定した列の値を1文書として読み込みます。
///
/// # 引数
///
/// * `path` - 入力コーパスのパス
/// * `use_col` - CSV入力のときに使用する列の名前
///
/// # 戻り値
///
/// 文書のリスト
fn load_input_file(path: &Path, use_col: Option<&str>) -> Result<Vec<String>, Box<dyn Error>> {
    let file_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match file_type.as_str() {
        "txt" => {
            let rdr = BufReader::new(File::open(path)?);
            Ok(rdr.lines().collect::<Result<_, _>>()?)
        }
        "csv" => load_csv_column(path, use_col),
        _ => Err(format!("unsupported input file type: {}", path.display()).into()),
    }
}

/// CSV入力から指定した列の値を読み出す
fn load_csv_column(path: &Path, use_col: Option<&str>) -> Result<Vec<String>, Box<dyn Error>> {
    let use_col = use_col.ok_or("use_col is required for csv input")?;

    let data = fs::read(path)?;
    let mut rows = read_csv_records(&data)?.into_iter();
    let header = rows.next().ok_or("the csv input is empty")?;
    let col = header
        .iter()
        .position(|name| name == use_col)
        .ok_or_else(|| format!("the csv header does not have a column named '{use_col}'"))?;

    Ok(rows
        .map(|row| row.into_iter().nth(col).unwrap_or_default())
        .collect())
}

/// CSVデータ全体をレコードのリストに解析する
///
/// 引用符で囲まれたフィールド内の改行やカンマも正しく処理します。
/// フィールドが出力バッファに収まらない場合はバッファを拡張して
/// 解析を継続します。
fn read_csv_records(data: &[u8]) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut rdr = csv_core::Reader::new();
    let mut input = data;
    let mut output = vec![0; 4096];
    let mut outlen = 0;

    let mut records = vec![];
    let mut fields = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(input, &mut output[outlen..]);
        input = &input[nin..];
        outlen += nout;
        match result {
            ReadFieldResult::InputEmpty => {
                // 入力をすべて渡し終えた。次の呼び出し(空入力)で最終フィールドが確定する
            }
            ReadFieldResult::OutputFull => {
                let len = output.len();
                output.resize(len * 2, 0);
            }
            ReadFieldResult::Field { record_end } => {
                fields.push(std::str::from_utf8(&output[..outlen])?.to_string());
                outlen = 0;
                if record_end {
                    records.push(std::mem::take(&mut fields));
                }
            }
            ReadFieldResult::End => break,
        }
    }
    Ok(records)
}
