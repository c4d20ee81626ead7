//! Translation of PFCP rule IEs into datapath rules.

use crate::datapath::{Datapath, FarRule, LocalFTeid, OuterHeader, PdrRule, GTPU_PORT};
use crate::error::N4Error;
use crate::ie::create_far::CreateFar;
use crate::ie::create_pdr::CreatePdr;
use crate::ie::f_teid::Fteid;
use crate::ie::outer_header_creation::{OuterHeaderCreation, OuterHeaderDescription};
use crate::ie::pdi::Pdi;
use crate::ie::ue_ip_address::UeIpAddress;
use crate::ie::update_far::UpdateFar;
use crate::ie::update_pdr::UpdatePdr;
use crate::ie::Ie;
use crate::session::UpfSession;
use log::{debug, warn};
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Maps rule IEs onto datapath calls. All mutation of datapath rule state
/// goes through here; the dispatcher only decides *which* translations to
/// run and in what order.
pub struct RuleTranslator {
    datapath: Arc<dyn Datapath>,
    dev: String,
}

impl RuleTranslator {
    pub fn new(datapath: Arc<dyn Datapath>, dev: impl Into<String>) -> Self {
        RuleTranslator {
            datapath,
            dev: dev.into(),
        }
    }

    /// Installs the PDR carried in a Create PDR IE and records the id in the
    /// session's ownership list.
    pub fn create_pdr(&self, session: &mut UpfSession, ie: &Ie) -> Result<u16, N4Error> {
        let create = CreatePdr::unmarshal(&ie.payload)?;
        let mut pdr = PdrRule {
            id: create.pdr_id.value,
            precedence: create.precedence.value,
            source_interface: create.pdi.source_interface.value as u8,
            local_f_teid: None,
            ue_addr: None,
            outer_header_removal: create.outer_header_removal.map(|ohr| ohr.description),
            far_id: create.far_id.map(|far_id| far_id.value).unwrap_or(0),
        };
        if let Some(f_teid) = &create.pdi.local_f_teid {
            pdr.local_f_teid = Some(local_f_teid(f_teid)?);
        }
        if let Some(ue_ip) = &create.pdi.ue_ip_address {
            pdr.ue_addr = Some(ue_addr(ue_ip)?);
        }

        self.datapath.add_pdr(&self.dev, &pdr)?;
        session.track_pdr(pdr.id);
        debug!("installed PDR {} (FAR link {})", pdr.id, pdr.far_id);
        Ok(pdr.id)
    }

    /// Installs the FAR carried in a Create FAR IE.
    pub fn create_far(&self, ie: &Ie) -> Result<u32, N4Error> {
        let create = CreateFar::unmarshal(&ie.payload)?;
        let mut far = FarRule {
            id: create.far_id.value,
            apply_action: create.apply_action.bits(),
            outer_header: None,
        };
        if let Some(params) = &create.forwarding_parameters {
            if let Some(di) = &params.destination_interface {
                debug!("FAR {}: destination interface {:?} not installed", far.id, di.value);
            }
            if let Some(ni) = &params.network_instance {
                debug!("FAR {}: network instance {:?} not installed", far.id, ni.instance);
            }
            if let Some(ohc) = &params.outer_header_creation {
                far.outer_header = Some(outer_header(ohc)?);
            }
        }

        self.datapath.add_far(&self.dev, &far)?;
        debug!("installed FAR {}", far.id);
        Ok(far.id)
    }

    /// Merges an Update PDR IE into the installed rule. Fields absent from
    /// the IE keep their installed values.
    pub fn update_pdr(&self, ie: &Ie) -> Result<u16, N4Error> {
        let update = UpdatePdr::unmarshal(&ie.payload)?;
        let pdr_id = update.pdr_id.value;
        let mut pdr = self
            .datapath
            .find_pdr_by_id(&self.dev, pdr_id)
            .ok_or_else(|| N4Error::not_found("PDR", pdr_id))?;

        if let Some(ohr) = update.outer_header_removal {
            pdr.outer_header_removal = Some(ohr.description);
        }
        if let Some(precedence) = update.precedence {
            pdr.precedence = precedence.value;
        }
        if let Some(pdi) = &update.pdi {
            self.merge_pdi(&mut pdr, pdi)?;
        }
        if let Some(far_id) = update.far_id {
            pdr.far_id = far_id.value;
        }

        self.datapath.mod_pdr(&self.dev, &pdr)?;
        debug!("updated PDR {pdr_id}");
        Ok(pdr_id)
    }

    fn merge_pdi(&self, pdr: &mut PdrRule, pdi: &Pdi) -> Result<(), N4Error> {
        pdr.source_interface = pdi.source_interface.value as u8;
        if let Some(f_teid) = &pdi.local_f_teid {
            pdr.local_f_teid = Some(local_f_teid(f_teid)?);
        }
        if let Some(ue_ip) = &pdi.ue_ip_address {
            pdr.ue_addr = Some(ue_addr(ue_ip)?);
        }
        Ok(())
    }

    /// Merges an Update FAR IE into the installed rule.
    pub fn update_far(&self, ie: &Ie) -> Result<u32, N4Error> {
        let update = UpdateFar::unmarshal(&ie.payload)?;
        let far_id = update.far_id.value;
        let mut far = self
            .datapath
            .find_far_by_id(&self.dev, far_id)
            .ok_or_else(|| N4Error::not_found("FAR", far_id))?;

        if let Some(action) = update.apply_action {
            far.apply_action = action.bits();
        }
        if let Some(params) = &update.update_forwarding_parameters {
            if let Some(ohc) = &params.outer_header_creation {
                far.outer_header = Some(outer_header(ohc)?);
            }
        }

        self.datapath.mod_far(&self.dev, &far)?;
        debug!("updated FAR {far_id}");
        Ok(far_id)
    }

    /// Removes a PDR, provided the session owns it.
    pub fn remove_pdr(&self, session: &mut UpfSession, pdr_id: u16) -> Result<(), N4Error> {
        if pdr_id == 0 {
            return Err(N4Error::invalid_request("PDR id must not be 0"));
        }
        if !session.owns_pdr(pdr_id) {
            warn!("PDR {pdr_id} not in this session, PDR not removed");
            return Err(N4Error::NotOwned(pdr_id));
        }
        self.datapath.del_pdr(&self.dev, pdr_id)?;
        session.forget_pdr(pdr_id);
        debug!("removed PDR {pdr_id}");
        Ok(())
    }

    /// Removes a FAR, first unlinking every PDR that points at it so no
    /// dangling reference survives the deletion.
    pub fn remove_far(&self, far_id: u32) -> Result<(), N4Error> {
        if far_id == 0 {
            return Err(N4Error::invalid_request("FAR id must not be 0"));
        }
        if self.datapath.find_far_by_id(&self.dev, far_id).is_none() {
            return Err(N4Error::not_found("FAR", far_id));
        }

        for pdr_id in self.datapath.related_pdrs(&self.dev, far_id) {
            self.datapath.set_pdr_far_id(&self.dev, pdr_id, 0)?;
        }
        self.datapath.del_far(&self.dev, far_id)?;
        debug!("removed FAR {far_id}");
        Ok(())
    }
}

fn local_f_teid(f_teid: &Fteid) -> Result<LocalFTeid, N4Error> {
    if f_teid.v4 && f_teid.v6 {
        return Err(N4Error::NotImplemented("dual-stack F-TEID"));
    }
    if f_teid.v6 {
        return Err(N4Error::NotImplemented("IPv6 F-TEID"));
    }
    let addr = f_teid
        .ipv4_address
        .ok_or_else(|| N4Error::invalid_request("F-TEID carries no address"))?;
    Ok(LocalFTeid {
        teid: f_teid.teid,
        addr,
    })
}

fn ue_addr(ue_ip: &UeIpAddress) -> Result<Ipv4Addr, N4Error> {
    if ue_ip.v4 && ue_ip.v6 {
        return Err(N4Error::NotImplemented("dual-stack UE IP address"));
    }
    if ue_ip.v6 {
        return Err(N4Error::NotImplemented("IPv6 UE address"));
    }
    ue_ip
        .ipv4_address
        .ok_or_else(|| N4Error::invalid_request("UE IP Address carries no address"))
}

fn outer_header(ohc: &OuterHeaderCreation) -> Result<OuterHeader, N4Error> {
    let description = ohc.description;
    let peer_addr = || {
        ohc.ipv4_address
            .ok_or_else(|| N4Error::invalid_request("Outer Header Creation carries no IPv4 address"))
    };
    if description.contains(OuterHeaderDescription::GTPU_UDP_IPV4) {
        Ok(OuterHeader {
            description: description.bits(),
            teid: ohc.teid.unwrap_or(0),
            peer_addr: peer_addr()?,
            port: GTPU_PORT,
        })
    } else if description.contains(OuterHeaderDescription::UDP_IPV4) {
        // Only plain UDP encapsulation carries a port of its own.
        Ok(OuterHeader {
            description: description.bits(),
            teid: 0,
            peer_addr: peer_addr()?,
            port: ohc.port.unwrap_or(0),
        })
    } else {
        Err(N4Error::NotImplemented("non-IPv4 outer header creation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapath::memory::MemoryDatapath;
    use crate::ie::apply_action::ApplyAction;
    use crate::ie::far_id::FarId;
    use crate::ie::forwarding_parameters::ForwardingParameters;
    use crate::ie::pdr_id::PdrId;
    use crate::ie::precedence::Precedence;
    use crate::ie::source_interface::{SourceInterface, SourceInterfaceValue};
    use crate::ie::{marshal_ies, IeType};

    const DEV: &str = "upfgtp";

    fn rig() -> (Arc<MemoryDatapath>, RuleTranslator, UpfSession) {
        let datapath = Arc::new(MemoryDatapath::new(DEV));
        let translator = RuleTranslator::new(datapath.clone(), DEV);
        let session = UpfSession::new(1, "192.0.2.1:8805".parse().unwrap());
        (datapath, translator, session)
    }

    fn access_pdi() -> Pdi {
        Pdi::new(SourceInterface::new(SourceInterfaceValue::Access))
    }

    fn create_pdr_ie(pdr_id: u16, far_id: u32) -> Ie {
        CreatePdr::new(PdrId::new(pdr_id), Precedence::new(100), access_pdi())
            .with_far_id(FarId::new(far_id))
            .to_ie()
    }

    fn create_far_ie(far_id: u32) -> Ie {
        CreateFar::new(FarId::new(far_id), ApplyAction::FORW).to_ie()
    }

    #[test]
    fn create_pdr_installs_and_tracks_ownership() {
        let (datapath, translator, mut session) = rig();
        let pdr_id = translator.create_pdr(&mut session, &create_pdr_ie(1, 10)).unwrap();
        assert_eq!(pdr_id, 1);
        assert!(session.owns_pdr(1));
        assert_eq!(datapath.find_pdr_by_id(DEV, 1).unwrap().far_id, 10);
    }

    #[test]
    fn create_pdr_decodes_f_teid_and_ue_ip() {
        let (datapath, translator, mut session) = rig();
        let pdi = access_pdi()
            .with_local_f_teid(Fteid::ipv4(0x00002a00, Ipv4Addr::new(192, 0, 2, 5)))
            .with_ue_ip_address(UeIpAddress::ipv4(Ipv4Addr::new(10, 60, 0, 1)));
        let ie = CreatePdr::new(PdrId::new(4), Precedence::new(10), pdi).to_ie();
        translator.create_pdr(&mut session, &ie).unwrap();

        let pdr = datapath.find_pdr_by_id(DEV, 4).unwrap();
        assert_eq!(
            pdr.local_f_teid,
            Some(LocalFTeid {
                teid: 0x00002a00,
                addr: Ipv4Addr::new(192, 0, 2, 5)
            })
        );
        assert_eq!(pdr.ue_addr, Some(Ipv4Addr::new(10, 60, 0, 1)));
    }

    #[test]
    fn create_pdr_missing_pdr_id_is_invalid_request() {
        let (datapath, translator, mut session) = rig();
        let payload = marshal_ies(&[Precedence::new(100).to_ie(), access_pdi().to_ie()]);
        let ie = Ie::new(IeType::CreatePdr, payload);
        let err = translator.create_pdr(&mut session, &ie).unwrap_err();
        assert!(matches!(err, N4Error::InvalidRequest(_)));
        assert_eq!(datapath.pdr_count(), 0);
        assert!(session.pdr_ids().is_empty());
    }

    #[test]
    fn create_pdr_dual_stack_f_teid_not_implemented() {
        let (datapath, translator, mut session) = rig();
        let f_teid = Fteid {
            v4: true,
            v6: true,
            teid: 1,
            ipv4_address: Some(Ipv4Addr::new(192, 0, 2, 5)),
            ipv6_address: Some("2001:db8::1".parse().unwrap()),
        };
        let ie = CreatePdr::new(
            PdrId::new(9),
            Precedence::new(10),
            access_pdi().with_local_f_teid(f_teid),
        )
        .to_ie();
        let err = translator.create_pdr(&mut session, &ie).unwrap_err();
        assert!(matches!(err, N4Error::NotImplemented(_)));
        assert_eq!(datapath.pdr_count(), 0);
    }

    #[test]
    fn create_far_gtpu_outer_header_gets_fixed_port() {
        let (datapath, translator, _) = rig();
        let far = CreateFar::new(FarId::new(10), ApplyAction::FORW).with_forwarding_parameters(
            ForwardingParameters::new().with_outer_header_creation(OuterHeaderCreation::gtpu_ipv4(
                0xbeef,
                Ipv4Addr::new(192, 0, 2, 40),
            )),
        );
        translator.create_far(&far.to_ie()).unwrap();

        let installed = datapath.find_far_by_id(DEV, 10).unwrap();
        let outer = installed.outer_header.unwrap();
        assert_eq!(outer.teid, 0xbeef);
        assert_eq!(outer.port, GTPU_PORT);
    }

    #[test]
    fn create_far_udp_outer_header_keeps_ie_port() {
        let (datapath, translator, _) = rig();
        let far = CreateFar::new(FarId::new(11), ApplyAction::FORW).with_forwarding_parameters(
            ForwardingParameters::new().with_outer_header_creation(OuterHeaderCreation::udp_ipv4(
                Ipv4Addr::new(192, 0, 2, 41),
                9000,
            )),
        );
        translator.create_far(&far.to_ie()).unwrap();

        let outer = datapath.find_far_by_id(DEV, 11).unwrap().outer_header.unwrap();
        assert_eq!(outer.teid, 0);
        assert_eq!(outer.port, 9000);
    }

    #[test]
    fn update_pdr_merges_only_present_fields() {
        let (datapath, translator, mut session) = rig();
        let pdi = access_pdi().with_ue_ip_address(UeIpAddress::ipv4(Ipv4Addr::new(10, 60, 0, 1)));
        let ie = CreatePdr::new(PdrId::new(1), Precedence::new(100), pdi)
            .with_far_id(FarId::new(10))
            .to_ie();
        translator.create_pdr(&mut session, &ie).unwrap();

        let update = UpdatePdr::new(PdrId::new(1)).with_precedence(Precedence::new(42));
        translator.update_pdr(&update.to_ie()).unwrap();

        let pdr = datapath.find_pdr_by_id(DEV, 1).unwrap();
        assert_eq!(pdr.precedence, 42);
        // Untouched fields keep their installed values.
        assert_eq!(pdr.far_id, 10);
        assert_eq!(pdr.ue_addr, Some(Ipv4Addr::new(10, 60, 0, 1)));
    }

    #[test]
    fn update_pdr_unknown_id_is_not_found() {
        let (_, translator, _) = rig();
        let update = UpdatePdr::new(PdrId::new(77));
        assert!(matches!(
            translator.update_pdr(&update.to_ie()),
            Err(N4Error::NotFound { .. })
        ));
    }

    #[test]
    fn update_far_merges_apply_action() {
        let (datapath, translator, _) = rig();
        translator.create_far(&create_far_ie(10)).unwrap();

        let update = UpdateFar::new(FarId::new(10))
            .with_apply_action(ApplyAction::BUFF | ApplyAction::NOCP);
        translator.update_far(&update.to_ie()).unwrap();

        let far = datapath.find_far_by_id(DEV, 10).unwrap();
        assert_eq!(far.apply_action, (ApplyAction::BUFF | ApplyAction::NOCP).bits());
    }

    #[test]
    fn remove_pdr_requires_ownership() {
        let (datapath, translator, mut session) = rig();
        translator.create_pdr(&mut session, &create_pdr_ie(1, 0)).unwrap();

        let mut stranger = UpfSession::new(2, "198.51.100.9:8805".parse().unwrap());
        let err = translator.remove_pdr(&mut stranger, 1).unwrap_err();
        assert!(matches!(err, N4Error::NotOwned(1)));
        // Rule stays installed.
        assert!(datapath.find_pdr_by_id(DEV, 1).is_some());

        translator.remove_pdr(&mut session, 1).unwrap();
        assert!(datapath.find_pdr_by_id(DEV, 1).is_none());
        assert!(!session.owns_pdr(1));
    }

    #[test]
    fn remove_pdr_zero_id_is_invalid_request() {
        let (_, translator, mut session) = rig();
        assert!(matches!(
            translator.remove_pdr(&mut session, 0),
            Err(N4Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn remove_far_clears_referring_pdrs() {
        let (datapath, translator, mut session) = rig();
        translator.create_pdr(&mut session, &create_pdr_ie(1, 10)).unwrap();
        translator.create_pdr(&mut session, &create_pdr_ie(2, 10)).unwrap();
        translator.create_far(&create_far_ie(10)).unwrap();

        translator.remove_far(10).unwrap();

        assert!(datapath.find_far_by_id(DEV, 10).is_none());
        assert_eq!(datapath.find_pdr_by_id(DEV, 1).unwrap().far_id, 0);
        assert_eq!(datapath.find_pdr_by_id(DEV, 2).unwrap().far_id, 0);
    }

    #[test]
    fn remove_far_unknown_id_is_not_found() {
        let (_, translator, _) = rig();
        assert!(matches!(
            translator.remove_far(99),
            Err(N4Error::NotFound { .. })
        ));
    }
}
