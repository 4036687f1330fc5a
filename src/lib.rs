//! Boundary-Tag Arena.
//!
//! `btarena`は、固定容量の単一バイト領域を境界タグ方式で管理する、明示的ストレージ型のメモリアロケータ.
//!
//! # 特徴
//!
//! - 各ブロックは、先頭(ヘッダ)と末尾(トレイラ)の両端に「状態バイト+サイズバイト」のタグを複製して保持する
//!   - フリーリスト等の別立てのデータ構造を持たずに、隣接ブロックの状態を調べることが可能
//! - 割当戦略は"FirstFit"
//!   - 空きブロックを先頭から走査し、要求サイズを満たす最初のものが選択される
//!   - 選択された空きブロックの残余が十分に大きい場合には、ブロックの分割が行われる
//! - 解放時には、左右の隣接ブロックとの併合が行われる
//!   - 領域の両端に置かれた永続割当の番兵ブロックによって、併合時の走査の停止が保証される
//! - 領域全体のサイズは構築時に固定され、動的な拡張・縮小は行われない
//! - スレッド間の同期機構は備えない(複数スレッドから利用する場合には、利用者側での直列化が必要)
//!
//! # モジュールの依存関係
//!
//! ```text
//! arena => {handle, metrics}
//! ```
//!
//! - [arena]モジュール:
//!   - 主に[Arena]構造体を提供
//!   - `btarena`の利用者が直接触るのはこの構造体
//!   - 境界タグの読み書き・FirstFit割当・解放時の併合、の全てを担当する
//! - [handle]モジュール:
//!   - [allocate]が返す不透明な[Handle]型を提供
//! - [metrics]モジュール:
//!   - [Prometheus]用のメトリクス群を提供
//!
//! [arena]: ./arena/index.html
//! [Arena]: ./arena/struct.Arena.html
//! [handle]: ./handle/index.html
//! [Handle]: ./handle/struct.Handle.html
//! [allocate]: ./arena/struct.Arena.html#method.allocate
//! [metrics]: ./metrics/index.html
//! [Prometheus]: https://prometheus.io/
#![warn(missing_docs)]
extern crate prometrics;
#[macro_use]
extern crate slog;
#[macro_use]
extern crate trackable;
extern crate uuid;

pub use crate::error::{Error, ErrorKind};

pub mod arena;
pub mod handle;
pub mod metrics;

mod error;

/// crate固有の`Result`型.
pub type Result<T> = std::result::Result<T, Error>;
