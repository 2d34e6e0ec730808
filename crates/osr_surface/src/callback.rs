//! Engine callbacks and the handle that queues them for the host thread.

use bytes::Bytes;
use log::debug;
use osr_core::{DragOperation, Point, Rect};
use tokio::sync::mpsc::UnboundedSender;

/// One painted frame: the full BGRA buffer plus the regions that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub buffer: Bytes,
    pub width: u32,
    pub height: u32,
    pub dirty_rects: Vec<Rect>,
    /// Frames for popup widgets (select drop-downs) are not composited.
    pub popup: bool,
}

/// A callback from the engine, applied on the host thread by `pump`.
#[derive(Debug)]
pub enum EngineCallback<D> {
    Paint(Frame),
    /// Raw engine cursor id.
    CursorChange(i32),
    StartDragging {
        data: Option<D>,
        allowed: DragOperation,
        position: Point,
    },
    UpdateDragCursor(DragOperation),
}

/// Sending side of a surface's callback queue. Engines call these from
/// whichever thread they run their callbacks on.
pub struct SurfaceHandle<D> {
    tx: UnboundedSender<EngineCallback<D>>,
}

impl<D> Clone for SurfaceHandle<D> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<D> SurfaceHandle<D> {
    pub(crate) fn new(tx: UnboundedSender<EngineCallback<D>>) -> Self {
        Self { tx }
    }

    /// Queue `callback`. Returns false once the surface has closed.
    pub fn send(&self, callback: EngineCallback<D>) -> bool {
        match self.tx.send(callback) {
            Ok(()) => true,
            Err(_) => {
                debug!(target: "osr_surface", "callback after close dropped");
                false
            }
        }
    }

    pub fn on_paint(
        &self,
        popup: bool,
        dirty_rects: Vec<Rect>,
        buffer: impl Into<Bytes>,
        width: u32,
        height: u32,
    ) -> bool {
        self.send(EngineCallback::Paint(Frame {
            buffer: buffer.into(),
            width,
            height,
            dirty_rects,
            popup,
        }))
    }

    pub fn on_cursor_change(&self, cursor_id: i32) -> bool {
        self.send(EngineCallback::CursorChange(cursor_id))
    }

    /// The engine wants to start a drag at `x, y`. Always answers false: the
    /// host runs no native drag loop, it keeps routing pointer motion to the
    /// surface as drag-over.
    pub fn start_dragging(&self, data: Option<D>, allowed: DragOperation, x: i32, y: i32) -> bool {
        self.send(EngineCallback::StartDragging {
            data,
            allowed,
            position: Point::new(x, y),
        });
        false
    }

    pub fn update_drag_cursor(&self, operation: DragOperation) -> bool {
        self.send(EngineCallback::UpdateDragCursor(operation))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
