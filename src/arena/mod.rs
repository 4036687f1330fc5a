//! 境界タグ付きブロック列として管理されるアリーナとその操作群.
use slog::Logger;
use uuid::Uuid;

use self::tag::{BlockTag, CONTROL_FIELDS_SIZE, MAX_PAYLOAD_SIZE, MIN_BLOCK_SIZE};
use crate::handle::Handle;
use crate::metrics::ArenaAllocatorMetrics;
use crate::{ErrorKind, Result};

pub use self::builder::ArenaBuilder;
pub use self::tag::BlockStatus;

mod builder;
pub(crate) mod tag;

/// 容量のデフォルト値.
pub const DEFAULT_CAPACITY: u16 = 256;

/// 受け入れ可能な容量の最小値.
///
/// 両端の番兵ブロック二つと、ペイロードが空の空きブロック一つが、
/// ちょうど収まるサイズとなっている.
pub const MIN_CAPACITY: u16 = 3 * CONTROL_FIELDS_SIZE as u16;

/// 受け入れ可能な容量の最大値.
///
/// 初期状態の空きブロックのペイロードサイズが、1バイトの
/// サイズフィールドで表現可能である必要があることによる制約.
pub const MAX_CAPACITY: u16 = MAX_PAYLOAD_SIZE as u16 + 3 * CONTROL_FIELDS_SIZE as u16;

/// 固定容量のバイト領域を、境界タグ付きブロックの列として管理するアリーナ.
///
/// 領域は、隙間も重なりも無いブロックの列として常に敷き詰められており、
/// 各ブロックは両端のタグに「割当状態」と「ペイロードサイズ」を複製して保持する.
/// 先頭と末尾には、ペイロードサイズが0の永続割当の番兵ブロックが置かれ、
/// 解放時の左右への併合走査が領域外に出ないことを保証している.
///
/// # 割当戦略
///
/// このアリーナは"FirstFit"戦略を採用している.
///
/// 新規割当要求が発行された際には、ブロック列を先頭から走査し、
/// 要求サイズを満たす最初の空きブロックが選択される.
///
/// 選択された空きブロックの残余が6バイト(空きブロックとして成立する
/// 最小サイズ)に満たない場合には、分割は行われずにブロック全体が
/// そのまま割り当てられる(最大5バイトの内部フラグメンテーションを許容する).
///
/// # Examples
///
/// ```
/// use btarena::arena::Arena;
///
/// let mut arena = Arena::with_capacity(256).unwrap();
/// let handle = arena.allocate(100).unwrap();
/// assert_eq!(arena.metrics().allocated_blocks(), 1);
///
/// arena.release(handle).unwrap();
/// assert_eq!(arena.metrics().usage_bytes(), 0);
/// ```
#[derive(Debug)]
pub struct Arena {
    pub(crate) buf: Vec<u8>,
    pub(crate) instance_uuid: Uuid,
    pub(crate) logger: Logger,
    pub(crate) metrics: ArenaAllocatorMetrics,
}
impl Arena {
    /// 指定された容量のアリーナを、デフォルト設定で生成する.
    ///
    /// `ArenaBuilder::new().capacity(capacity).finish()`の糖衣.
    pub fn with_capacity(capacity: u16) -> Result<Self> {
        track!(ArenaBuilder::new().capacity(capacity).finish())
    }

    /// アリーナの容量(バイト数)を返す.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// このインスタンスを識別するためのUUIDを返す.
    pub fn instance_uuid(&self) -> Uuid {
        self.instance_uuid
    }

    /// アリーナ用のメトリクスを返す.
    pub fn metrics(&self) -> &ArenaAllocatorMetrics {
        &self.metrics
    }

    /// `size`バイトのペイロードを持つブロックを割り当てる.
    ///
    /// ブロック列を先頭から走査し、要求サイズを満たす最初の空きブロックが
    /// 使用される(FirstFit). 空きブロックの残余が小さすぎて独立した
    /// 空きブロックを構成できない場合には、分割は行われず、ブロック全体が
    /// そのまま割り当てられる.
    ///
    /// # Errors
    ///
    /// - `size`が「容量 - 制御フィールド4バイト」を超えている場合には
    ///   `ErrorKind::RequestTooLarge`(アリーナの状態は変更されない)
    /// - 要求サイズを満たす空きブロックが存在しない場合には
    ///   `ErrorKind::NoSpace`(アリーナの状態は変更されない)
    ///
    /// # Examples
    ///
    /// ```
    /// use btarena::ErrorKind;
    /// use btarena::arena::Arena;
    ///
    /// let mut arena = Arena::with_capacity(256).unwrap();
    /// assert_eq!(
    ///     arena.allocate(253).err().map(|e| *e.kind()),
    ///     Some(ErrorKind::RequestTooLarge)
    /// );
    /// assert!(arena.allocate(100).is_ok());
    /// ```
    pub fn allocate(&mut self, size: u8) -> Result<Handle> {
        track_assert!(
            usize::from(size) + CONTROL_FIELDS_SIZE <= self.capacity(),
            ErrorKind::RequestTooLarge,
            "size:{}, capacity:{}",
            size,
            self.capacity()
        );

        let mut offset = 0;
        while offset < self.capacity() {
            let header = track!(tag::read_header(&self.buf, offset))?;
            if header.status.is_free() && header.payload_size >= size {
                return Ok(self.carve(offset, header, size));
            }
            offset += header.block_size();
        }

        self.metrics.nospace_failures.increment();
        track_panic!(ErrorKind::NoSpace, "size:{}", size)
    }

    /// `allocate`が返したハンドルに対応するブロックを解放する.
    ///
    /// 解放されたブロックの左右に空きブロックが隣接している場合には、
    /// それらは一つの空きブロックへと併合される. 併合後の領域に対して、
    /// 隣接する空きブロックが残ることはない.
    ///
    /// # Errors
    ///
    /// - ハンドルが現在のいずれのブロックの先頭も指していない場合には
    ///   `ErrorKind::InvalidHandle`
    /// - 対応するブロックが既に解放済みの場合には`ErrorKind::DoubleFree`
    ///
    /// いずれの場合にも、アリーナの状態は変更されない.
    pub fn release(&mut self, handle: Handle) -> Result<()> {
        let offset = track!(self.locate(handle))?;
        let released = track!(tag::read_header(&self.buf, offset))?;
        track_assert!(
            !released.status.is_free(),
            ErrorKind::DoubleFree,
            "handle:{}",
            handle
        );

        let mut start = offset;
        let mut payload_size = usize::from(released.payload_size);

        // 左方向への併合: 左隣のトレイラを辿り、番兵を含む割当済み
        // ブロックに当たるまで繰り返す
        loop {
            let left = track!(tag::read_trailer_before(&self.buf, start))?;
            if !left.status.is_free() {
                break;
            }
            start -= left.block_size();
            payload_size += left.block_size();
            self.metrics.coalesced_blocks.increment();
        }

        // 右方向への併合
        loop {
            let next_offset = start + payload_size + CONTROL_FIELDS_SIZE;
            let right = track!(tag::read_header(&self.buf, next_offset))?;
            if !right.status.is_free() {
                break;
            }
            payload_size += right.block_size();
            self.metrics.coalesced_blocks.increment();
        }

        // 併合後のブロックのヘッダとトレイラは、走査が終わってから一括で
        // 書き込む(部分的な書き込みを挟むと、途中状態のタグ不一致が
        // 後続の走査を壊し得るため)
        let merged = BlockTag::new(BlockStatus::Free, payload_size as u8);
        tag::write_block(&mut self.buf, start, merged);

        self.metrics.count_releasion(released.block_size());
        debug!(
            self.logger,
            "Releases a block: offset={}, payload={}, merged_offset={}, merged_payload={}",
            offset,
            released.payload_size,
            start,
            payload_size
        );
        Ok(())
    }

    /// 全ブロックを先頭から順に列挙する、読み取り専用のイテレータを返す.
    ///
    /// アリーナの状態は変更されない. 改めて本メソッドを呼び出せば、
    /// 再び先頭からの走査となる.
    ///
    /// 走査中に壊れたタグを検知した場合には、その位置で
    /// `ErrorKind::InconsistentState`の要素が返され、列挙は打ち切られる.
    pub fn blocks(&self) -> Blocks {
        Blocks {
            buf: &self.buf,
            offset: 0,
        }
    }

    /// アリーナ全体の不変条件を検査する.
    ///
    /// 検査されるのは以下の項目:
    ///
    /// - 全ブロックでヘッダとトレイラの内容が一致している
    /// - ブロック列が隙間も重なりも無く容量全体を敷き詰めている
    /// - 両端にペイロードサイズ0の割当済み番兵ブロックが存在する
    /// - 空きブロック同士が隣接していない(併合の最大性)
    ///
    /// いずれかに違反している場合には`ErrorKind::InconsistentState`が
    /// 返される. これは過去に検出されなかった破壊を意味しており、
    /// 回復可能なエラーではない.
    pub fn validate(&self) -> Result<()> {
        let mut offset = 0;
        let mut prev_is_free = false;
        while offset < self.capacity() {
            let header = track!(tag::read_header(&self.buf, offset))?;
            let trailer = track!(tag::read_trailer(&self.buf, offset))?;
            track_assert_eq!(
                header,
                trailer,
                ErrorKind::InconsistentState,
                "offset:{}",
                offset
            );
            if offset == 0 || offset == self.capacity() - CONTROL_FIELDS_SIZE {
                track_assert!(
                    !header.status.is_free() && header.payload_size == 0,
                    ErrorKind::InconsistentState,
                    "broken sentinel: offset:{}",
                    offset
                );
            }
            track_assert!(
                !(prev_is_free && header.status.is_free()),
                ErrorKind::InconsistentState,
                "adjacent free blocks: offset:{}",
                offset
            );
            prev_is_free = header.status.is_free();
            offset += header.block_size();
        }
        track_assert_eq!(offset, self.capacity(), ErrorKind::InconsistentState);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn carve(&mut self, offset: usize, original: BlockTag, size: u8) -> Handle {
        // 分割判定に使う残余は、タグを書き換える前のペイロードサイズから計算する
        let leftover = usize::from(original.payload_size) - usize::from(size);
        if leftover < MIN_BLOCK_SIZE {
            let allocated = BlockTag::new(BlockStatus::Allocated, original.payload_size);
            tag::write_block(&mut self.buf, offset, allocated);
            self.metrics.count_allocation(allocated.block_size());
            debug!(
                self.logger,
                "Allocates a whole block: offset={}, payload={}, requested={}",
                offset,
                allocated.payload_size,
                size
            );
        } else {
            let allocated = BlockTag::new(BlockStatus::Allocated, size);
            let free = BlockTag::new(BlockStatus::Free, (leftover - CONTROL_FIELDS_SIZE) as u8);
            tag::write_block(&mut self.buf, offset, allocated);
            tag::write_block(&mut self.buf, offset + allocated.block_size(), free);
            self.metrics.count_allocation(allocated.block_size());
            self.metrics.split_blocks.increment();
            debug!(
                self.logger,
                "Allocates by splitting: offset={}, payload={}, free_payload={}",
                offset,
                size,
                free.payload_size
            );
        }
        Handle::from_block_offset(offset)
    }

    // ハンドルが現在のブロック境界上の(番兵ではない)ブロックを指している
    // ことを検証し、そのブロックの先頭オフセットを返す.
    //
    // 走査のついでにヘッダとトレイラの照合も行い、不一致を検知した場合には
    // 致命的エラーとして報告する.
    fn locate(&self, handle: Handle) -> Result<usize> {
        let block_offset = handle.block_offset();
        let mut offset = 0;
        while offset < self.capacity() {
            let header = track!(tag::read_header(&self.buf, offset))?;
            let trailer = track!(tag::read_trailer(&self.buf, offset))?;
            if header != trailer {
                crit!(
                    self.logger,
                    "Corrupted block: offset={}, header={:?}, trailer={:?}",
                    offset,
                    header,
                    trailer
                );
                track_panic!(ErrorKind::InconsistentState, "offset:{}", offset);
            }
            if offset == block_offset {
                track_assert!(
                    offset != 0 && offset != self.capacity() - CONTROL_FIELDS_SIZE,
                    ErrorKind::InvalidHandle,
                    "handle:{} (sentinel)",
                    handle
                );
                return Ok(offset);
            }
            if offset > block_offset {
                break;
            }
            offset += header.block_size();
        }
        track_panic!(ErrorKind::InvalidHandle, "handle:{}", handle)
    }
}

/// [`Arena::blocks`]が返す、ブロック列挙用のイテレータ.
///
/// [`Arena::blocks`]: ./struct.Arena.html#method.blocks
#[derive(Debug)]
pub struct Blocks<'a> {
    buf: &'a [u8],
    offset: usize,
}
impl<'a> Iterator for Blocks<'a> {
    type Item = Result<BlockEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buf.len() {
            return None;
        }
        let offset = self.offset;
        match track!(tag::read_header(self.buf, offset)) {
            Err(e) => {
                self.offset = self.buf.len();
                Some(Err(e))
            }
            Ok(header) => {
                self.offset += header.block_size();
                Some(Ok(BlockEntry {
                    offset: offset as u16,
                    status: header.status,
                    payload_size: header.payload_size,
                }))
            }
        }
    }
}

/// 一つのブロックの情報.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEntry {
    /// ブロックの先頭オフセット.
    pub offset: u16,

    /// ブロックの割当状態.
    pub status: BlockStatus,

    /// ペイロードのバイト数.
    pub payload_size: u8,
}

#[cfg(test)]
mod tests {
    use trackable::result::TestResult;

    use super::*;

    #[test]
    fn initial_layout() -> TestResult {
        let arena = track!(Arena::with_capacity(256))?;
        assert_eq!(
            track!(block_list(&arena))?,
            vec![
                entry(0, BlockStatus::Allocated, 0),
                entry(4, BlockStatus::Free, 244),
                entry(252, BlockStatus::Allocated, 0),
            ]
        );
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn capacity_boundaries() -> TestResult {
        assert_eq!(
            Arena::with_capacity(11).err().map(|e| *e.kind()),
            Some(ErrorKind::CapacityTooSmall)
        );
        assert_eq!(
            Arena::with_capacity(268).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidInput)
        );

        // 最小容量では、ペイロードが空の空きブロック一つだけが残る
        let mut arena = track!(Arena::with_capacity(12))?;
        assert_eq!(
            track!(block_list(&arena))?,
            vec![
                entry(0, BlockStatus::Allocated, 0),
                entry(4, BlockStatus::Free, 0),
                entry(8, BlockStatus::Allocated, 0),
            ]
        );
        let handle = track!(arena.allocate(0))?;
        assert_eq!(
            arena.allocate(0).err().map(|e| *e.kind()),
            Some(ErrorKind::NoSpace)
        );
        track!(arena.release(handle))?;
        track!(arena.validate())?;

        let arena = track!(Arena::with_capacity(267))?;
        assert_eq!(
            track!(block_list(&arena))?[1],
            entry(4, BlockStatus::Free, 255)
        );
        Ok(())
    }

    #[test]
    fn whole_arena_round_trip() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let initial = arena.as_bytes().to_vec();

        // 残余が4バイト(< MIN_BLOCK_SIZE)なので、分割されずに
        // 244バイトのブロック全体が割り当てられる
        let handle = track!(arena.allocate(244))?;
        assert_eq!(
            track!(block_list(&arena))?,
            vec![
                entry(0, BlockStatus::Allocated, 0),
                entry(4, BlockStatus::Allocated, 244),
                entry(252, BlockStatus::Allocated, 0),
            ]
        );

        track!(arena.release(handle))?;
        assert_eq!(arena.as_bytes(), &initial[..]);
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn internal_fragmentation_is_bounded() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;

        // 要求240に対して残余は4: ブロック全体(ペイロード244)が使われる
        let handle = track!(arena.allocate(240))?;
        assert_eq!(
            track!(block_list(&arena))?[1],
            entry(4, BlockStatus::Allocated, 244)
        );
        track!(arena.release(handle))?;

        // 要求238に対して残余は6: ちょうど分割可能
        track!(arena.allocate(238))?;
        assert_eq!(
            track!(block_list(&arena))?[1..3],
            [
                entry(4, BlockStatus::Allocated, 238),
                entry(246, BlockStatus::Free, 2),
            ][..]
        );
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn split_then_isolated_release() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let _h1 = track!(arena.allocate(12))?;
        let h2 = track!(arena.allocate(12))?;
        let _h3 = track!(arena.allocate(12))?;
        assert_eq!(
            track!(block_list(&arena))?,
            vec![
                entry(0, BlockStatus::Allocated, 0),
                entry(4, BlockStatus::Allocated, 12),
                entry(20, BlockStatus::Allocated, 12),
                entry(36, BlockStatus::Allocated, 12),
                entry(52, BlockStatus::Free, 196),
                entry(252, BlockStatus::Allocated, 0),
            ]
        );

        // 両隣が割当済みなので、併合は発生しない
        track!(arena.release(h2))?;
        assert_eq!(
            track!(block_list(&arena))?[2],
            entry(20, BlockStatus::Free, 12)
        );
        assert_eq!(arena.metrics().coalesced_blocks(), 0);
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn chained_coalescing() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let h1 = track!(arena.allocate(12))?;
        let h2 = track!(arena.allocate(12))?;
        let h3 = track!(arena.allocate(12))?;

        track!(arena.release(h2))?;

        // 右隣のFree(12)と併合されて、12 + 12 + 4 = 28バイトのペイロードになる
        track!(arena.release(h1))?;
        assert_eq!(
            track!(block_list(&arena))?[1],
            entry(4, BlockStatus::Free, 28)
        );
        track!(arena.validate())?;

        // 左のFree(28)とも右のFree(196)とも併合されて、初期状態に戻る
        track!(arena.release(h3))?;
        assert_eq!(
            track!(block_list(&arena))?,
            vec![
                entry(0, BlockStatus::Allocated, 0),
                entry(4, BlockStatus::Free, 244),
                entry(252, BlockStatus::Allocated, 0),
            ]
        );
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn release_order_independence() -> TestResult {
        let expected = {
            let arena = track!(Arena::with_capacity(256))?;
            track!(block_list(&arena))?
        };

        for reversed in &[false, true] {
            let mut arena = track!(Arena::with_capacity(256))?;
            let h1 = track!(arena.allocate(100))?;
            let h2 = track!(arena.allocate(80))?;
            if *reversed {
                track!(arena.release(h2))?;
                track!(arena.release(h1))?;
            } else {
                track!(arena.release(h1))?;
                track!(arena.release(h2))?;
            }
            assert_eq!(track!(block_list(&arena))?, expected);
            track!(arena.validate())?;
        }
        Ok(())
    }

    #[test]
    fn first_fit_prefers_lowest_offset() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let h1 = track!(arena.allocate(50))?;
        let _h2 = track!(arena.allocate(50))?;
        let h3 = track!(arena.allocate(50))?;

        track!(arena.release(h1))?;
        track!(arena.release(h3))?;

        // 先頭側のFree(50)がオフセット末尾側のものより優先される
        let h4 = track!(arena.allocate(40))?;
        assert_eq!(h4.as_u16(), h1.as_u16());
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn rejection_boundary() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;

        // 253 > 256 - 4: アリーナ全体を使っても収容不可能
        assert_eq!(
            arena.allocate(253).err().map(|e| *e.kind()),
            Some(ErrorKind::RequestTooLarge)
        );

        // 252は収容可能なサイズではあるが、番兵を除いた空きブロックの
        // ペイロードは244しかないので、空き不足となる
        assert_eq!(
            arena.allocate(252).err().map(|e| *e.kind()),
            Some(ErrorKind::NoSpace)
        );
        assert_eq!(arena.metrics().nospace_failures(), 1);

        assert!(arena.allocate(244).is_ok());
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn double_free_is_detected() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let handle = track!(arena.allocate(12))?;
        track!(arena.release(handle))?;
        assert_eq!(
            arena.release(handle).err().map(|e| *e.kind()),
            Some(ErrorKind::DoubleFree)
        );
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn stale_handle_is_detected() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let h1 = track!(arena.allocate(12))?;
        let h2 = track!(arena.allocate(12))?;
        let _h3 = track!(arena.allocate(12))?;

        track!(arena.release(h1))?;
        track!(arena.release(h2))?;

        // 併合済みのFree(28)から20バイトを切り出すと、h2の指す位置は
        // 新しいブロックのペイロードの内部になる
        track!(arena.allocate(20))?;
        assert_eq!(
            arena.release(h2).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidHandle)
        );
        track!(arena.validate())?;
        Ok(())
    }

    #[test]
    fn sentinels_are_not_releasable() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;

        // 先頭の番兵のペイロード位置を指すハンドルを偽造する
        let forged = Handle::from_block_offset(0);
        assert_eq!(
            arena.release(forged).err().map(|e| *e.kind()),
            Some(ErrorKind::InvalidHandle)
        );
        Ok(())
    }

    #[test]
    fn corruption_is_fatal() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let handle = track!(arena.allocate(12))?;

        // トレイラの状態バイトを直接破壊する
        arena.buf[4 + 2 + 12 + 1] = 0xFF;
        assert_eq!(
            arena.release(handle).err().map(|e| *e.kind()),
            Some(ErrorKind::InconsistentState)
        );
        assert_eq!(
            arena.validate().err().map(|e| *e.kind()),
            Some(ErrorKind::InconsistentState)
        );
        Ok(())
    }

    #[test]
    fn validate_rejects_adjacent_free_blocks() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let h1 = track!(arena.allocate(12))?;
        let _h2 = track!(arena.allocate(12))?;

        // 割当済みブロックのタグを手で空きに書き換えると、
        // 併合の最大性が破れる
        track!(arena.release(h1))?;
        tag::write_block(&mut arena.buf, 20, BlockTag::new(BlockStatus::Free, 12));
        assert_eq!(
            arena.validate().err().map(|e| *e.kind()),
            Some(ErrorKind::InconsistentState)
        );
        Ok(())
    }

    #[test]
    fn blocks_iterator_is_restartable() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        track!(arena.allocate(12))?;

        let first = track!(block_list(&arena))?;
        let second = track!(block_list(&arena))?;
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        Ok(())
    }

    #[test]
    fn metrics_works() -> TestResult {
        let mut arena = track!(Arena::with_capacity(256))?;
        let handle = track!(arena.allocate(12))?;
        assert_eq!(arena.metrics().allocated_blocks(), 1);
        assert_eq!(arena.metrics().allocated_bytes(), 16);
        assert_eq!(arena.metrics().split_blocks(), 1);
        assert_eq!(arena.metrics().usage_bytes(), 16);
        assert_eq!(arena.metrics().capacity_bytes(), 256);

        track!(arena.release(handle))?;
        assert_eq!(arena.metrics().released_blocks(), 1);
        assert_eq!(arena.metrics().released_bytes(), 16);
        assert_eq!(arena.metrics().coalesced_blocks(), 1);
        assert_eq!(arena.metrics().usage_bytes(), 0);
        Ok(())
    }

    fn entry(offset: u16, status: BlockStatus, payload_size: u8) -> BlockEntry {
        BlockEntry {
            offset,
            status,
            payload_size,
        }
    }

    fn block_list(arena: &Arena) -> Result<Vec<BlockEntry>> {
        arena.blocks().collect()
    }
}
