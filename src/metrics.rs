//! [Prometheus][prometheus]用のメトリクス.
//!
//! [prometheus]: https://prometheus.io/
use prometrics::metrics::{Counter, MetricBuilder};

/// アリーナのアロケータのメトリクス.
///
/// バイト数を数えるカウンタは、いずれも制御フィールド(ヘッダ+トレイラの4バイト)を
/// 含んだブロックサイズ単位で加算される.
#[derive(Debug, Clone)]
pub struct ArenaAllocatorMetrics {
    pub(crate) allocated_blocks: Counter,
    pub(crate) allocated_bytes: Counter,
    pub(crate) released_blocks: Counter,
    pub(crate) released_bytes: Counter,
    pub(crate) split_blocks: Counter,
    pub(crate) coalesced_blocks: Counter,
    pub(crate) nospace_failures: Counter,
    pub(crate) capacity_bytes: u64,
}
impl ArenaAllocatorMetrics {
    /// ブロックの割当回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_allocated_blocks_total <COUNTER>
    /// ```
    pub fn allocated_blocks(&self) -> u64 {
        self.allocated_blocks.value() as u64
    }

    /// これまでに割り当てたバイト数の合計.
    ///
    /// 分割が行われなかった場合には、要求サイズではなく、
    /// 実際に割り当てられたブロックのサイズがそのまま加算される
    /// (i.e., 内部フラグメンテーション分も含まれる).
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_allocated_bytes_total <COUNTER>
    /// ```
    pub fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes.value() as u64
    }

    /// ブロックの解放回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_released_blocks_total <COUNTER>
    /// ```
    pub fn released_blocks(&self) -> u64 {
        self.released_blocks.value() as u64
    }

    /// これまでに解放されたバイト数の合計.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_released_bytes_total <COUNTER>
    /// ```
    pub fn released_bytes(&self) -> u64 {
        self.released_bytes.value() as u64
    }

    /// 割当時の分割によって新たに作られた空きブロックの数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_split_blocks_total <COUNTER>
    /// ```
    pub fn split_blocks(&self) -> u64 {
        self.split_blocks.value() as u64
    }

    /// 解放時の併合によって取り込まれた隣接ブロックの数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_coalesced_blocks_total <COUNTER>
    /// ```
    pub fn coalesced_blocks(&self) -> u64 {
        self.coalesced_blocks.value() as u64
    }

    /// 空き領域不足による割当失敗の回数.
    ///
    /// # Prometheus
    ///
    /// ```prometheus
    /// btarena_allocator_nospace_failures_total <COUNTER>
    /// ```
    pub fn nospace_failures(&self) -> u64 {
        self.nospace_failures.value() as u64
    }

    /// アリーナの容量(バイト数).
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    /// 現在使用中のバイト数(制御フィールドを含む).
    pub fn usage_bytes(&self) -> u64 {
        // NOTE: 以下の順番で値を取得しないとアンダーフローする可能性がある
        let dec = self.released_bytes();
        let inc = self.allocated_bytes();
        inc - dec
    }

    pub(crate) fn new(builder: &MetricBuilder, capacity_bytes: u64) -> Self {
        let mut builder = builder.clone();
        builder.namespace("btarena").subsystem("allocator");
        ArenaAllocatorMetrics {
            allocated_blocks: builder
                .counter("allocated_blocks_total")
                .help("Number of allocated blocks")
                .finish()
                .expect("Never fails"),
            allocated_bytes: builder
                .counter("allocated_bytes_total")
                .help("Number of allocated bytes (control fields included)")
                .finish()
                .expect("Never fails"),
            released_blocks: builder
                .counter("released_blocks_total")
                .help("Number of released blocks")
                .finish()
                .expect("Never fails"),
            released_bytes: builder
                .counter("released_bytes_total")
                .help("Number of released bytes (control fields included)")
                .finish()
                .expect("Never fails"),
            split_blocks: builder
                .counter("split_blocks_total")
                .help("Number of free blocks created by splitting")
                .finish()
                .expect("Never fails"),
            coalesced_blocks: builder
                .counter("coalesced_blocks_total")
                .help("Number of neighboring blocks absorbed while coalescing")
                .finish()
                .expect("Never fails"),
            nospace_failures: builder
                .counter("nospace_failures_total")
                .help("Number of allocation failures caused by no available space")
                .finish()
                .expect("Never fails"),
            capacity_bytes,
        }
    }

    pub(crate) fn count_allocation(&self, block_size: usize) {
        self.allocated_blocks.increment();
        self.allocated_bytes.add_u64(block_size as u64);
    }

    pub(crate) fn count_releasion(&self, block_size: usize) {
        self.released_blocks.increment();
        self.released_bytes.add_u64(block_size as u64);
    }
}
