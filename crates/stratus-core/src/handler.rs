//! Event handling.

use crate::event::Event;

/// Trait for consuming events in simulation components.
pub trait EventHandler {
    /// Processes an incoming event.
    fn on(&mut self, event: Event);
}

/// Dispatches an event to one of the listed payload types.
///
/// Expands into a chain of downcast attempts; an event whose payload matches
/// none of the branches is reported via
/// [`log_unhandled_event`](crate::log::log_unhandled_event).
#[macro_export]
macro_rules! cast {
    ( match $event:ident.data { $( $type:ident { $($tt:tt)* } => { $($expr:tt)* } )+ } ) => {
        $(
            if $event.data.is::<$type>() {
                if let Ok(__value) = $event.data.downcast::<$type>() {
                    let $type { $($tt)* } = *__value;
                    $($expr)*
                }
            } else
        )*
        {
            $crate::log::log_unhandled_event($event);
        }
    }
}
