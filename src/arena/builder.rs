use prometrics::metrics::MetricBuilder;
use slog::{Discard, Logger};
use uuid::Uuid;

use crate::arena::tag::{self, BlockStatus, BlockTag, CONTROL_FIELDS_SIZE};
use crate::arena::{Arena, DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY};
use crate::metrics::ArenaAllocatorMetrics;
use crate::{ErrorKind, Result};

/// `Arena`のビルダ.
#[derive(Debug, Clone)]
pub struct ArenaBuilder {
    capacity: u16,
    instance_uuid: Option<Uuid>,
    logger: Logger,
    metrics: MetricBuilder,
}
impl ArenaBuilder {
    /// デフォルト設定で`ArenaBuilder`インスタンスを生成する.
    pub fn new() -> Self {
        ArenaBuilder {
            capacity: DEFAULT_CAPACITY,
            instance_uuid: None,
            logger: Logger::root(Discard, o!()),
            metrics: MetricBuilder::new(),
        }
    }

    /// アリーナの容量(バイト数)を設定する.
    ///
    /// 取り得る値は[`MIN_CAPACITY`]から[`MAX_CAPACITY`]の間であり、
    /// この範囲外の値が指定された場合には`finish()`呼び出し時にエラーが返される.
    ///
    /// デフォルト値は[`DEFAULT_CAPACITY`].
    ///
    /// [`MIN_CAPACITY`]: ./constant.MIN_CAPACITY.html
    /// [`MAX_CAPACITY`]: ./constant.MAX_CAPACITY.html
    /// [`DEFAULT_CAPACITY`]: ./constant.DEFAULT_CAPACITY.html
    pub fn capacity(&mut self, capacity: u16) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// アリーナのインスタンスを識別するためのUUIDを設定する.
    ///
    /// 本メソッドが呼ばれていない場合は、ランダムなUUIDが割り当てられる.
    pub fn instance_uuid(&mut self, uuid: Uuid) -> &mut Self {
        self.instance_uuid = Some(uuid);
        self
    }

    /// アリーナ用のloggerを登録する.
    ///
    /// デフォルトでは、何も出力しないloggerが使用される.
    pub fn logger(&mut self, logger: Logger) -> &mut Self {
        self.logger = logger;
        self
    }

    /// メトリクス用の共通設定を登録する.
    ///
    /// デフォルト値は`MetricBuilder::new()`.
    pub fn metrics(&mut self, metrics: MetricBuilder) -> &mut Self {
        self.metrics = metrics;
        self
    }

    /// 初期レイアウトを構築して、新しい`Arena`インスタンスを生成する.
    ///
    /// 初期レイアウトは「番兵ブロック、容量いっぱいの空きブロック、番兵ブロック」の
    /// 三つのブロックから成る.
    ///
    /// # Errors
    ///
    /// - 容量が[`MIN_CAPACITY`](./constant.MIN_CAPACITY.html)未満の場合には
    ///   `ErrorKind::CapacityTooSmall`
    /// - 容量が[`MAX_CAPACITY`](./constant.MAX_CAPACITY.html)を超える場合には
    ///   `ErrorKind::InvalidInput`
    pub fn finish(&self) -> Result<Arena> {
        track_assert!(
            self.capacity >= MIN_CAPACITY,
            ErrorKind::CapacityTooSmall,
            "capacity:{}",
            self.capacity
        );
        track_assert!(
            self.capacity <= MAX_CAPACITY,
            ErrorKind::InvalidInput,
            "capacity:{}",
            self.capacity
        );
        let capacity = usize::from(self.capacity);
        let mut buf = vec![0; capacity];

        let sentinel = BlockTag::new(BlockStatus::Allocated, 0);
        tag::write_block(&mut buf, 0, sentinel);
        tag::write_block(&mut buf, capacity - CONTROL_FIELDS_SIZE, sentinel);

        let free = BlockTag::new(
            BlockStatus::Free,
            (capacity - 3 * CONTROL_FIELDS_SIZE) as u8,
        );
        tag::write_block(&mut buf, CONTROL_FIELDS_SIZE, free);

        let instance_uuid = self.instance_uuid.unwrap_or_else(Uuid::new_v4);
        let logger = self.logger.new(o!("arena" => instance_uuid.to_string()));
        let metrics = ArenaAllocatorMetrics::new(&self.metrics, capacity as u64);
        info!(
            logger,
            "Creates a new arena: capacity={}, free={}", capacity, free.payload_size
        );
        Ok(Arena {
            buf,
            instance_uuid,
            logger,
            metrics,
        })
    }
}
impl Default for ArenaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
