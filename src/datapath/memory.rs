//! Table-backed datapath, standing in for the kernel tunnel driver.

use super::{Datapath, DatapathError, FarRule, PdrRule};
use ahash::{HashMap, HashMapExt};
use parking_lot::RwLock;

/// Holds PDR and FAR tables for a single named device.
pub struct MemoryDatapath {
    dev: String,
    pdrs: RwLock<HashMap<u16, PdrRule>>,
    fars: RwLock<HashMap<u32, FarRule>>,
}

impl MemoryDatapath {
    pub fn new(dev: impl Into<String>) -> Self {
        MemoryDatapath {
            dev: dev.into(),
            pdrs: RwLock::new(HashMap::new()),
            fars: RwLock::new(HashMap::new()),
        }
    }

    fn check_dev(&self, dev: &str) -> Result<(), DatapathError> {
        if dev == self.dev {
            Ok(())
        } else {
            Err(DatapathError::NoSuchDevice(dev.to_string()))
        }
    }

    pub fn pdr_count(&self) -> usize {
        self.pdrs.read().len()
    }

    pub fn far_count(&self) -> usize {
        self.fars.read().len()
    }
}

impl Datapath for MemoryDatapath {
    fn add_pdr(&self, dev: &str, pdr: &PdrRule) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        let mut pdrs = self.pdrs.write();
        if pdrs.contains_key(&pdr.id) {
            return Err(DatapathError::PdrExists(pdr.id));
        }
        pdrs.insert(pdr.id, pdr.clone());
        Ok(())
    }

    fn mod_pdr(&self, dev: &str, pdr: &PdrRule) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        let mut pdrs = self.pdrs.write();
        match pdrs.get_mut(&pdr.id) {
            Some(entry) => {
                *entry = pdr.clone();
                Ok(())
            }
            None => Err(DatapathError::NoSuchPdr(pdr.id)),
        }
    }

    fn del_pdr(&self, dev: &str, pdr_id: u16) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        self.pdrs
            .write()
            .remove(&pdr_id)
            .map(|_| ())
            .ok_or(DatapathError::NoSuchPdr(pdr_id))
    }

    fn find_pdr_by_id(&self, dev: &str, pdr_id: u16) -> Option<PdrRule> {
        if dev != self.dev {
            return None;
        }
        self.pdrs.read().get(&pdr_id).cloned()
    }

    fn add_far(&self, dev: &str, far: &FarRule) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        let mut fars = self.fars.write();
        if fars.contains_key(&far.id) {
            return Err(DatapathError::FarExists(far.id));
        }
        fars.insert(far.id, far.clone());
        Ok(())
    }

    fn mod_far(&self, dev: &str, far: &FarRule) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        let mut fars = self.fars.write();
        match fars.get_mut(&far.id) {
            Some(entry) => {
                *entry = far.clone();
                Ok(())
            }
            None => Err(DatapathError::NoSuchFar(far.id)),
        }
    }

    fn del_far(&self, dev: &str, far_id: u32) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        self.fars
            .write()
            .remove(&far_id)
            .map(|_| ())
            .ok_or(DatapathError::NoSuchFar(far_id))
    }

    fn find_far_by_id(&self, dev: &str, far_id: u32) -> Option<FarRule> {
        if dev != self.dev {
            return None;
        }
        self.fars.read().get(&far_id).cloned()
    }

    fn related_pdrs(&self, dev: &str, far_id: u32) -> Vec<u16> {
        if dev != self.dev || far_id == 0 {
            return Vec::new();
        }
        let mut ids: Vec<u16> = self
            .pdrs
            .read()
            .values()
            .filter(|pdr| pdr.far_id == far_id)
            .map(|pdr| pdr.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn set_pdr_far_id(&self, dev: &str, pdr_id: u16, far_id: u32) -> Result<(), DatapathError> {
        self.check_dev(dev)?;
        let mut pdrs = self.pdrs.write();
        match pdrs.get_mut(&pdr_id) {
            Some(pdr) => {
                pdr.far_id = far_id;
                Ok(())
            }
            None => Err(DatapathError::NoSuchPdr(pdr_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV: &str = "upfgtp";

    fn pdr(id: u16, far_id: u32) -> PdrRule {
        PdrRule {
            id,
            precedence: 100,
            source_interface: 0,
            local_f_teid: None,
            ue_addr: None,
            outer_header_removal: None,
            far_id,
        }
    }

    fn far(id: u32) -> FarRule {
        FarRule {
            id,
            apply_action: 0x02,
            outer_header: None,
        }
    }

    #[test]
    fn add_find_del_pdr() {
        let dp = MemoryDatapath::new(DEV);
        dp.add_pdr(DEV, &pdr(1, 10)).unwrap();
        assert_eq!(dp.find_pdr_by_id(DEV, 1).unwrap().far_id, 10);
        dp.del_pdr(DEV, 1).unwrap();
        assert!(dp.find_pdr_by_id(DEV, 1).is_none());
    }

    #[test]
    fn duplicate_add_rejected() {
        let dp = MemoryDatapath::new(DEV);
        dp.add_pdr(DEV, &pdr(1, 0)).unwrap();
        assert_eq!(
            dp.add_pdr(DEV, &pdr(1, 0)),
            Err(DatapathError::PdrExists(1))
        );
        dp.add_far(DEV, &far(10)).unwrap();
        assert_eq!(dp.add_far(DEV, &far(10)), Err(DatapathError::FarExists(10)));
    }

    #[test]
    fn mod_missing_rule_rejected() {
        let dp = MemoryDatapath::new(DEV);
        assert_eq!(dp.mod_pdr(DEV, &pdr(1, 0)), Err(DatapathError::NoSuchPdr(1)));
        assert_eq!(dp.mod_far(DEV, &far(9)), Err(DatapathError::NoSuchFar(9)));
    }

    #[test]
    fn wrong_device_rejected() {
        let dp = MemoryDatapath::new(DEV);
        assert!(matches!(
            dp.add_pdr("other0", &pdr(1, 0)),
            Err(DatapathError::NoSuchDevice(_))
        ));
        assert!(dp.find_pdr_by_id("other0", 1).is_none());
    }

    #[test]
    fn related_pdrs_tracks_links() {
        let dp = MemoryDatapath::new(DEV);
        dp.add_far(DEV, &far(10)).unwrap();
        dp.add_pdr(DEV, &pdr(1, 10)).unwrap();
        dp.add_pdr(DEV, &pdr(2, 10)).unwrap();
        dp.add_pdr(DEV, &pdr(3, 20)).unwrap();
        assert_eq!(dp.related_pdrs(DEV, 10), vec![1, 2]);

        dp.set_pdr_far_id(DEV, 2, 0).unwrap();
        assert_eq!(dp.related_pdrs(DEV, 10), vec![1]);
        assert_eq!(dp.find_pdr_by_id(DEV, 2).unwrap().far_id, 0);
    }

    #[test]
    fn unlinked_pdrs_are_never_related() {
        let dp = MemoryDatapath::new(DEV);
        dp.add_pdr(DEV, &pdr(1, 0)).unwrap();
        assert!(dp.related_pdrs(DEV, 0).is_empty());
    }

    #[test]
    fn pdr_may_reference_missing_far() {
        // Transactional window: PDRs are created before their FARs.
        let dp = MemoryDatapath::new(DEV);
        dp.add_pdr(DEV, &pdr(1, 99)).unwrap();
        assert!(dp.find_far_by_id(DEV, 99).is_none());
    }
}
