//! 合同解析：条款边界判断、条款切分、条款分类
//!
//! 全部是纯函数，不做 IO，不会失败。

pub mod boundary;
pub mod classifier;
pub mod segmenter;

pub use boundary::is_clause_boundary;
pub use classifier::{classify, CLAUSE_TAXONOMY};
pub use segmenter::{segment, segment_with_strategy, Segmentation, Strategy};
