// src/processing/ndvi.rs
use anyhow::Result;
use gdal::raster::Buffer;
use rayon::prelude::*;

/// Value written for pixels where NDVI is undefined
pub const NODATA: f32 = -999.0;

/// NDVI for a single pixel: (NIR - RED) / (NIR + RED)
#[inline]
pub fn ndvi(red: f32, nir: f32) -> f32 {
    let denominator = nir + red;
    if denominator == 0.0 {
        return NODATA;
    }

    let value = (nir - red) / denominator;
    if value.is_finite() {
        value
    } else {
        NODATA
    }
}

/// Normalized Difference Vegetation Index calculator
pub struct NdviCalculator {
    red_nodata: Option<f32>,
    nir_nodata: Option<f32>,
    name: String,
}

impl NdviCalculator {
    pub fn new(red_nodata: Option<f32>, nir_nodata: Option<f32>) -> Self {
        Self {
            red_nodata,
            nir_nodata,
            name: "NDVI".to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calculate(&self, red: &Buffer<f32>, nir: &Buffer<f32>) -> Result<Buffer<f32>> {
        if red.shape() != nir.shape() {
            return Err(anyhow::anyhow!(
                "Band blocks differ in shape: red {:?}, nir {:?}",
                red.shape(),
                nir.shape()
            ));
        }

        let shape = red.shape();
        let red_data = red.data();
        let nir_data = nir.data();

        let mut result_data = vec![0.0f32; red_data.len()];

        result_data.par_iter_mut().enumerate().for_each(|(i, result)| {
            let red_val = red_data[i];
            let nir_val = nir_data[i];

            *result = if is_nodata(red_val, self.red_nodata) || is_nodata(nir_val, self.nir_nodata) {
                NODATA
            } else {
                ndvi(red_val, nir_val)
            };
        });

        Ok(Buffer::new(shape, result_data))
    }
}

fn is_nodata(value: f32, nodata: Option<f32>) -> bool {
    match nodata {
        Some(nd) if nd.is_nan() => value.is_nan(),
        Some(nd) => value == nd,
        None => false,
    }
}
