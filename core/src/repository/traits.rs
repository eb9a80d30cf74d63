use anyhow::Result;

use crate::model::session::CalculationSession;

pub trait SessionRepository {
    fn load(&self) -> Result<CalculationSession>;
    fn save(&self, session: &CalculationSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
