//! 계산 결과 묶음과 안정적인 공유 ID.
//!
//! 공유 ID는 `{paipan, kline}` JSON의 SHA-256 해시 앞 10자리(hex)입니다.
//! 같은 입력은 같은 JSON을 만들므로 ID도 항상 같습니다.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{KLineResult, PaipanResult};
use crate::error::ChartResult;

/// 공유 ID 길이 (hex 문자 수).
pub const SHARE_ID_LEN: usize = 10;

/// 명반과 K선을 함께 담은 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    pub paipan: PaipanResult,
    pub kline: KLineResult,
}

impl Computation {
    /// 이 결과의 공유 ID.
    pub fn share_id(&self) -> ChartResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(share_id_of(&bytes))
    }
}

/// 직렬화된 바이트의 공유 ID.
pub fn share_id_of(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut id = hex::encode(digest);
    id.truncate(SHARE_ID_LEN);
    id
}
