use num::Num;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SparseVec;

impl<N> Serialize for SparseVec<N>
where
    N: Num + Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // len + stored entries only
        let mut state = serializer.serialize_struct("SparseVec", 3)?;
        state.serialize_field("len", &(self.len() as u64))?;
        state.serialize_field("inds", self.inds())?;
        state.serialize_field("vals", self.vals())?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVec<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SparseVecData<N> {
            len: u64,
            inds: Vec<u32>,
            vals: Vec<N>,
        }

        let data = SparseVecData::<N>::deserialize(deserializer)?;
        if data.inds.len() != data.vals.len() {
            return Err(D::Error::custom("SparseVec inds/vals length mismatch"));
        }
        let len = data.len as usize;
        if data.inds.iter().any(|&i| i as usize >= len) {
            return Err(D::Error::custom("SparseVec index out of bounds"));
        }
        // from_pairs restores the sorted, zero-free invariant
        Ok(SparseVec::from_pairs(len, data.inds.into_iter().zip(data.vals)))
    }
}
