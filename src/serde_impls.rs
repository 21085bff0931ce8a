/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

// A treap is (de)serialized as the plain sequence it represents. Priorities
// and pending tags are never written out.

use serde::ser::{Serialize, Serializer};

use crate::{Element, Treap};

impl<T, R> Serialize for Treap<T, R>
where
    T: Element + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

#[cfg(feature = "std")]
impl<'de, T> serde::de::Deserialize<'de> for Treap<T>
where
    T: Element + serde::de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let values = std::vec::Vec::<T>::deserialize(deserializer)?;
        Ok(Treap::build(values))
    }
}
