use trackable;

/// crate固有のエラー型.
#[derive(Debug, Clone, TrackableError)]
pub struct Error(trackable::error::TrackableError<ErrorKind>);

/// 発生し得るエラーの種別.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// アリーナの容量が小さすぎて、初期レイアウト(両端の番兵ブロック+空きブロック一つ)を構築できない.
    ///
    /// # 典型的な対応策
    ///
    /// - より大きな容量を指定して、アリーナを作り直す
    CapacityTooSmall,

    /// 要求サイズが大きすぎて、たとえアリーナ全体を単一のブロックとして
    /// 使用したとしても割当が不可能.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して、要求サイズを小さくする
    RequestTooLarge,

    /// 要求サイズを満たす空きブロックが存在しない.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者が他のブロックを解放した上でリトライする
    NoSpace,

    /// ハンドルが、現在のいずれのブロックの先頭も指していない.
    ///
    /// 分割や併合によってブロック境界が変わった後の、古いハンドルを
    /// 使用した場合等に、このエラーが返される.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して、有効なハンドルのみを使用する
    InvalidHandle,

    /// 既に解放済みのブロックを、再度解放しようとした.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して、二重解放を取り除く
    DoubleFree,

    /// 入力が不正.
    ///
    /// # 典型的な対応策
    ///
    /// - 利用者側のプログラムを修正して入力を正しくする
    InvalidInput,

    /// アリーナの内部状態が不整合に陥っている.
    ///
    /// ヘッダとトレイラの不一致や、ブロック列が容量全体を敷き詰めて
    /// いない等、過去に検出されなかった破壊が存在することを示しており、
    /// 回復可能なエラーではない.
    ///
    /// # 典型的な対応策
    ///
    /// - バグ修正を行ってプログラムを更新する
    InconsistentState,
}
impl trackable::error::ErrorKind for ErrorKind {}
