//! 割当済みブロックを参照するためのハンドル.
use std::fmt;

use crate::arena::tag::HEADER_SIZE;

/// [`allocate`]が返す、割当済みブロック一つを指し示す不透明なハンドル.
///
/// ハンドルの実体は、アリーナ内におけるそのブロックのペイロードの
/// 開始オフセットであるが、利用者がこの値を直接オフセットとして
/// 解釈することは想定されていない.
///
/// [`release`]に渡されたハンドルは、盲目的に信用されるのではなく、
/// その時点のブロック境界と突き合わせて検証される
/// (ズレていれば`ErrorKind::InvalidHandle`).
///
/// 分割や併合によってブロック境界が変わると、変更より前に取得された
/// ハンドルは無効になり得る. ただし`allocate`の返り値のハンドルは、
/// そのブロック自体が解放されるまでは有効であり続ける.
///
/// [`allocate`]: ../arena/struct.Arena.html#method.allocate
/// [`release`]: ../arena/struct.Arena.html#method.release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u16);
impl Handle {
    pub(crate) fn from_block_offset(offset: usize) -> Self {
        Handle((offset + HEADER_SIZE) as u16)
    }

    pub(crate) fn block_offset(self) -> usize {
        usize::from(self.0) - HEADER_SIZE
    }

    /// ハンドルの値(ペイロードの開始オフセット)を返す.
    pub fn as_u16(self) -> u16 {
        self.0
    }
}
impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let handle = Handle::from_block_offset(4);
        assert_eq!(handle.as_u16(), 6);
        assert_eq!(handle.block_offset(), 4);
        assert_eq!(handle.to_string(), "6");
    }
}
