/// Things the terminal front end reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Throw the current generation away and start from a fresh random grid
    Reset,

    /// The terminal is now `cols` by `rows` characters
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
