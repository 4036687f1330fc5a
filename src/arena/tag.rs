//! 境界タグ(ヘッダ・トレイラ)の読み書き.
//!
//! ブロックのレイアウトは以下の通り:
//!
//! ```text
//! +--------+--------+------------------------+--------+--------+
//! | status |  size  |        payload         |  size  | status |
//! +--------+--------+------------------------+--------+--------+
//! |<--- header ---->|<---- payload size ---->|<--- trailer --->|
//! |<----------------------- block size ----------------------->|
//! ```
//!
//! `status`と`size`は各1バイトで、ヘッダとトレイラに同一の値が複製される.
//! トレイラ内の並びはヘッダと逆(サイズが先、状態が後)であることに注意.
use crate::{ErrorKind, Result};

/// ヘッダ(状態バイト+サイズバイト)のバイト数.
pub(crate) const HEADER_SIZE: usize = 2;

/// ヘッダとトレイラを合わせた、一ブロック当たりの制御フィールドのバイト数.
pub(crate) const CONTROL_FIELDS_SIZE: usize = 4;

/// 分割後に残される空きブロックとして許容される、最小のペイロードサイズ.
pub(crate) const MIN_PAYLOAD_SIZE: usize = 2;

/// 分割後に残される空きブロックとして許容される、最小のブロックサイズ.
pub(crate) const MIN_BLOCK_SIZE: usize = MIN_PAYLOAD_SIZE + CONTROL_FIELDS_SIZE;

/// 一つのブロックが保持可能なペイロードの最大バイト数(サイズフィールドが1バイトであることによる制約).
pub(crate) const MAX_PAYLOAD_SIZE: usize = 255;

const STATUS_FREE: u8 = 0;
const STATUS_ALLOCATED: u8 = 1;

/// ブロックの割当状態.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// 未割当.
    Free,

    /// 割当済み.
    Allocated,
}
impl BlockStatus {
    /// このブロックが未割当かどうかを返す.
    pub fn is_free(self) -> bool {
        self == BlockStatus::Free
    }

    fn from_u8(status: u8) -> Result<Self> {
        match status {
            STATUS_FREE => Ok(BlockStatus::Free),
            STATUS_ALLOCATED => Ok(BlockStatus::Allocated),
            _ => track_panic!(
                ErrorKind::InconsistentState,
                "Unknown status byte: {}",
                status
            ),
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            BlockStatus::Free => STATUS_FREE,
            BlockStatus::Allocated => STATUS_ALLOCATED,
        }
    }
}

/// ブロックの両端に複製して格納される境界タグ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockTag {
    pub status: BlockStatus,
    pub payload_size: u8,
}
impl BlockTag {
    pub fn new(status: BlockStatus, payload_size: u8) -> Self {
        BlockTag {
            status,
            payload_size,
        }
    }

    /// 制御フィールドも含めた、ブロック全体のバイト数.
    pub fn block_size(self) -> usize {
        usize::from(self.payload_size) + CONTROL_FIELDS_SIZE
    }
}

/// `offset`から始まるブロックのヘッダを読み込む.
pub(crate) fn read_header(buf: &[u8], offset: usize) -> Result<BlockTag> {
    let status = track!(BlockStatus::from_u8(buf[offset]), "offset:{}", offset)?;
    Ok(BlockTag::new(status, buf[offset + 1]))
}

/// `offset`から始まるブロックのトレイラを読み込む.
///
/// トレイラの位置はヘッダ内のサイズ値から導出される. 従って、
/// 両タグのサイズ値が食い違っている場合には、ここで読まれる
/// トレイラのサイズ値はヘッダと一致しない(呼び出し側で検出可能).
pub(crate) fn read_trailer(buf: &[u8], offset: usize) -> Result<BlockTag> {
    let size_pos = offset + HEADER_SIZE + usize::from(buf[offset + 1]);
    let status = track!(BlockStatus::from_u8(buf[size_pos + 1]), "offset:{}", offset)?;
    Ok(BlockTag::new(status, buf[size_pos]))
}

/// `offset`の直前で終わるブロック(左隣)のトレイラを読み込む.
pub(crate) fn read_trailer_before(buf: &[u8], offset: usize) -> Result<BlockTag> {
    let status = track!(BlockStatus::from_u8(buf[offset - 1]), "offset:{}", offset)?;
    Ok(BlockTag::new(status, buf[offset - 2]))
}

/// `offset`から始まるブロックのヘッダを書き込む.
pub(crate) fn write_header(buf: &mut [u8], offset: usize, tag: BlockTag) {
    buf[offset] = tag.status.as_u8();
    buf[offset + 1] = tag.payload_size;
}

/// `offset`から始まるブロックのトレイラを書き込む.
///
/// トレイラの位置は、これから書き込むタグ内のサイズ値から導出される.
pub(crate) fn write_trailer(buf: &mut [u8], offset: usize, tag: BlockTag) {
    let size_pos = offset + HEADER_SIZE + usize::from(tag.payload_size);
    buf[size_pos] = tag.payload_size;
    buf[size_pos + 1] = tag.status.as_u8();
}

/// ヘッダとトレイラの両方を書き込む.
pub(crate) fn write_block(buf: &mut [u8], offset: usize, tag: BlockTag) {
    write_header(buf, offset, tag);
    write_trailer(buf, offset, tag);
}

#[cfg(test)]
mod tests {
    use trackable::result::TestResult;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn it_works() -> TestResult {
        let mut buf = vec![0; 32];
        let tag = BlockTag::new(BlockStatus::Allocated, 12);
        assert_eq!(tag.block_size(), 16);

        write_block(&mut buf, 8, tag);
        assert_eq!(buf[8], 1);
        assert_eq!(buf[9], 12);
        assert_eq!(buf[22], 12);
        assert_eq!(buf[23], 1);

        assert_eq!(track!(read_header(&buf, 8))?, tag);
        assert_eq!(track!(read_trailer(&buf, 8))?, tag);
        assert_eq!(track!(read_trailer_before(&buf, 24))?, tag);
        Ok(())
    }

    #[test]
    fn desync_is_visible() -> TestResult {
        let mut buf = vec![0; 32];
        write_block(&mut buf, 0, BlockTag::new(BlockStatus::Free, 8));

        // トレイラのサイズだけを書き換えると、読み戻したタグが一致しなくなる
        buf[10] = 7;
        let header = track!(read_header(&buf, 0))?;
        let trailer = track!(read_trailer(&buf, 0))?;
        assert_ne!(header, trailer);
        Ok(())
    }

    #[test]
    fn unknown_status_byte() {
        let mut buf = vec![0; 16];
        write_block(&mut buf, 0, BlockTag::new(BlockStatus::Free, 4));
        buf[0] = 0xFF;

        let e = read_header(&buf, 0).err().expect("must fail");
        assert_eq!(*e.kind(), ErrorKind::InconsistentState);
    }
}
