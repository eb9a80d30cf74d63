use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::model::event::SofEvent;
use crate::model::session::CalculationSession;
use crate::model::terms::LaytimeTerms;
use crate::model::vessel::VesselInfo;
use crate::repository::SessionRepository;

pub struct SessionService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> SessionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn session(&self) -> Result<CalculationSession> {
        self.repo.load()
    }

    // An import replaces the vessel header and the timeline but keeps the
    // terms the user already entered; extraction output carries no rates.
    pub fn import(&self, vessel: VesselInfo, events: Vec<SofEvent>) -> Result<usize> {
        let mut session = self.repo.load()?;
        let count = events.len();
        session.vessel = vessel;
        session.events = events;
        self.repo.save(&session)?;
        Ok(count)
    }

    pub fn add_event(&self, event: SofEvent) -> Result<SofEvent> {
        let mut session = self.repo.load()?;
        session.events.push(event.clone());
        self.repo.save(&session)?;
        Ok(event)
    }

    pub fn update_event(&self, event: &SofEvent) -> Result<()> {
        let mut session = self.repo.load()?;
        if let Some(pos) = session.events.iter().position(|e| e.id == event.id) {
            session.events[pos] = event.clone();
            self.repo.save(&session)
        } else {
            Err(anyhow!("Event with ID {} not found", event.id))
        }
    }

    pub fn delete_event(&self, id: &Uuid) -> Result<()> {
        let mut session = self.repo.load()?;
        let initial_len = session.events.len();
        session.events.retain(|e| e.id != *id);

        if session.events.len() == initial_len {
            return Err(anyhow!("Event with ID {} not found", id));
        }

        self.repo.save(&session)
    }

    pub fn update_terms(&self, terms: LaytimeTerms) -> Result<()> {
        let mut session = self.repo.load()?;
        session.terms = terms;
        self.repo.save(&session)
    }

    pub fn update_vessel(&self, vessel: VesselInfo) -> Result<()> {
        let mut session = self.repo.load()?;
        session.vessel = vessel;
        self.repo.save(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MemorySessionRepo {
        session: RefCell<CalculationSession>,
    }

    impl MemorySessionRepo {
        fn new() -> Self {
            Self {
                session: RefCell::new(CalculationSession::default()),
            }
        }
    }

    impl SessionRepository for MemorySessionRepo {
        fn load(&self) -> Result<CalculationSession> {
            Ok(self.session.borrow().clone())
        }
        fn save(&self, session: &CalculationSession) -> Result<()> {
            *self.session.borrow_mut() = session.clone();
            Ok(())
        }
        fn clear(&self) -> Result<()> {
            self.save(&CalculationSession::default())
        }
    }

    #[test]
    fn test_add_update_delete_event() {
        let service = SessionService::new(MemorySessionRepo::new());

        let added = service
            .add_event(SofEvent::new(
                "NOR tendered".to_string(),
                Some("20.01.2021 2005".to_string()),
                None,
            ))
            .unwrap();
        assert_eq!(service.session().unwrap().events.len(), 1);

        let mut edited = added.clone();
        edited.end = Some("20.01.2021 2400".to_string());
        service.update_event(&edited).unwrap();
        assert_eq!(
            service.session().unwrap().events[0].end.as_deref(),
            Some("20.01.2021 2400")
        );

        service.delete_event(&added.id).unwrap();
        assert!(service.session().unwrap().events.is_empty());

        // Deleting again is an error, not a silent no-op.
        assert!(service.delete_event(&added.id).is_err());
    }

    #[test]
    fn test_import_keeps_terms() {
        let service = SessionService::new(MemorySessionRepo::new());

        let mut terms = LaytimeTerms::default();
        terms.allowed_laytime_days = 3.0;
        service.update_terms(terms).unwrap();

        let mut vessel = VesselInfo::default();
        vessel.vessel_name = Some("MV CAPE ASTER".to_string());
        let count = service
            .import(
                vessel,
                vec![SofEvent::new("Anchored".to_string(), None, None)],
            )
            .unwrap();

        assert_eq!(count, 1);
        let session = service.session().unwrap();
        assert_eq!(session.terms.allowed_laytime_days, 3.0);
        assert_eq!(session.vessel.vessel_name.as_deref(), Some("MV CAPE ASTER"));
        assert_eq!(session.events.len(), 1);
    }
}
