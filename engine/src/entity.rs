//! Generic entity logic.

use hecs::Component;

use crate::Runtime;

// Dummy wrapper so we can write impls for it directly instead of deriving
// a trait for hecs::Entity and writing every fn signature twice.
/// Game entity identifier datatype. All the actual contents live in the
/// ECS.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &Runtime) -> T
    where
        T: Component + Clone + Default,
    {
        r.ecs
            .get::<&T>(self.0)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut Runtime, val: T)
    where
        T: Component + Default + PartialEq,
    {
        if val == T::default() {
            // Remove default values, abstraction layer assumes components
            // are always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin
            // with, just ignore that.
            let _ = r.ecs.remove_one::<T>(self.0);
        } else {
            r.ecs.insert_one(self.0, val).expect("Entity::set failed");
        }
    }
}
