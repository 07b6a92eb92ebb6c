//! Safetensors parameter ingestion

use std::fs::File;
use std::io::Read;
use std::path::Path;

use safetensors::SafeTensors;

use crate::error::{ModelError, Result};

/// Loads classifier parameters from a safetensors file
pub struct SafetensorsLoader {
    /// Raw safetensors data
    data: Vec<u8>,
}

impl SafetensorsLoader {
    /// Load from a `.safetensors` file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Load from already-read safetensors bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        // Validate the header up front so later lookups only fail on
        // missing tensors
        SafeTensors::deserialize(&data).map_err(|e| ModelError::Safetensors(e.to_string()))?;
        Ok(Self { data })
    }

    /// Names of all tensors in the file
    pub fn tensor_names(&self) -> Result<Vec<String>> {
        let tensors = SafeTensors::deserialize(&self.data)
            .map_err(|e| ModelError::Safetensors(e.to_string()))?;
        Ok(tensors.names().into_iter().map(String::from).collect())
    }

    /// Load a tensor as f32 values, converting from F32, BF16, or F16
    pub fn tensor_f32(&self, name: &str) -> Result<Vec<f32>> {
        let tensors = SafeTensors::deserialize(&self.data)
            .map_err(|e| ModelError::Safetensors(e.to_string()))?;

        let tensor = tensors
            .tensor(name)
            .map_err(|_| ModelError::MissingTensor(name.to_string()))?;

        let data = tensor.data();
        let values = match tensor.dtype() {
            safetensors::Dtype::F32 => data
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
            safetensors::Dtype::BF16 => data
                .chunks_exact(2)
                .map(|b| bf16_to_f32(u16::from_le_bytes([b[0], b[1]])))
                .collect(),
            safetensors::Dtype::F16 => data
                .chunks_exact(2)
                .map(|b| f16_to_f32(u16::from_le_bytes([b[0], b[1]])))
                .collect(),
            other => {
                return Err(ModelError::InvalidDtype {
                    expected: "f32, bf16, or f16".to_string(),
                    got: format!("{:?}", other),
                });
            }
        };

        Ok(values)
    }
}

/// Convert BFloat16 to f32
fn bf16_to_f32(bits: u16) -> f32 {
    // BF16 is the upper 16 bits of f32
    f32::from_bits((bits as u32) << 16)
}

/// Convert Float16 to f32
fn f16_to_f32(bits: u16) -> f32 {
    let sign = ((bits >> 15) & 1) as u32;
    let exp = ((bits >> 10) & 0x1F) as u32;
    let frac = (bits & 0x3FF) as u32;

    if exp == 0 {
        if frac == 0 {
            f32::from_bits(sign << 31)
        } else {
            // Subnormal
            let mut e = -14i32;
            let mut f = frac;
            while (f & 0x400) == 0 {
                f <<= 1;
                e -= 1;
            }
            f &= 0x3FF;
            let f32_exp = ((e + 127) as u32) << 23;
            f32::from_bits((sign << 31) | f32_exp | (f << 13))
        }
    } else if exp == 31 {
        // Inf or NaN
        f32::from_bits((sign << 31) | (0xFF << 23) | (frac << 13))
    } else {
        let f32_exp = ((exp as i32 - 15 + 127) as u32) << 23;
        f32::from_bits((sign << 31) | f32_exp | (frac << 13))
    }
}
