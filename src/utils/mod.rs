use rand::RngCore;
use rand::rngs::OsRng;

/// 短ID字符集：数字 + 大写字母 + 小写字母
pub const SHORT_ID_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
/// 短ID长度
pub const SHORT_ID_LEN: usize = 22;

// 62 * 4，超出的字节直接丢弃以保证均匀分布
const ACCEPT_BELOW: u8 = 248;

/// 生成对外暴露的说说ID
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Result<String, rand::Error>;
}

/// 基于系统随机源的短ID生成器
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortIdGenerator;

impl IdGenerator for ShortIdGenerator {
    fn generate(&self) -> Result<String, rand::Error> {
        short_id_from(&mut OsRng)
    }
}

/// 从给定随机源拒绝采样出一个短ID，随机源出错时直接返回错误，不重试
pub fn short_id_from<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, rand::Error> {
    let mut id = String::with_capacity(SHORT_ID_LEN);
    let mut buf = [0u8; 32];

    while id.len() < SHORT_ID_LEN {
        rng.try_fill_bytes(&mut buf)?;
        for byte in buf {
            if byte >= ACCEPT_BELOW {
                continue;
            }
            id.push(SHORT_ID_ALPHABET[(byte % 62) as usize] as char);
            if id.len() == SHORT_ID_LEN {
                break;
            }
        }
    }

    Ok(id)
}
