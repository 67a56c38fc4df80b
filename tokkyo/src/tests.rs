//! Tokkyoのテストモジュール群
//!
//! 各コンポーネントを横断して、NTCIR形式のサンプル文書に対する
//! パイプライン全体の動作を検証するテストを含みます。
