//! エラー型の定義
//!
//! このモジュールは、Tokkyoライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// Tokkyo専用のResult型
///
/// エラー型としてデフォルトで[`TokkyoError`]を使用します。
pub type Result<T, E = TokkyoError> = std::result::Result<T, E>;

/// Tokkyoのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
/// 各バリアントは特定のエラー条件に対応しています。
#[derive(Debug, thiserror::Error)]
pub enum TokkyoError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 整数変換エラー
    ///
    /// [`TryFromIntError`](std::num::TryFromIntError)のエラーバリアント。
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// 標準I/Oエラー
    ///
    /// [`std::io::Error`]のエラーバリアント。
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// YAMLデシリアライゼーションエラー
    ///
    /// [`serde_yaml::Error`]のエラーバリアント。
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// bincodeデコードエラー
    ///
    /// [`DecodeError`](bincode::error::DecodeError)のエラーバリアント。
    #[error(transparent)]
    BincodeDecode(#[from] bincode::error::DecodeError),

    /// bincodeエンコードエラー
    ///
    /// [`EncodeError`](bincode::error::EncodeError)のエラーバリアント。
    #[error(transparent)]
    BincodeEncode(#[from] bincode::error::EncodeError),
}

impl TokkyoError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}
