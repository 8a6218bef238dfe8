/// Generational handle to an opaque object owned by a rendering surface.
///
/// The surface hands these out from its mutation methods; holders can only
/// give them back (release), never dereference them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32); // (index, generation)

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}
