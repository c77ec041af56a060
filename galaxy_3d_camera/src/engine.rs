/// Galaxy3D Engine - Singleton manager for the camera subsystem
///
/// Holds the process-wide graphics device and camera pool, plus the global
/// logger. State lives in thread-safe static storage behind RwLocks.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::camera::{CameraPool, CameraPoolDesc};
use crate::graphics_device::GraphicsDevice;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Graphics device singleton (wrapped in Mutex for thread-safe mutable access)
    graphics_device: RwLock<Option<Arc<Mutex<dyn GraphicsDevice>>>>,
    /// Camera pool singleton (internally synchronized)
    camera_pool: RwLock<Option<Arc<CameraPool>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            graphics_device: RwLock::new(None),
            camera_pool: RwLock::new(None),
        }
    }
}

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// The graphics device must be registered before the camera pool, since the
/// pool allocates its upload buffers (and every camera its GPU resources)
/// through it.
///
/// # Example
///
/// ```ignore
/// use galaxy_3d_camera::galaxy3d::Engine;
/// use galaxy_3d_camera::galaxy3d::camera::{CameraDesc, CameraPoolDesc};
///
/// Engine::initialize()?;
/// Engine::create_graphics_device(my_backend_device)?;
/// Engine::create_camera_pool(CameraPoolDesc::default())?;
///
/// let pool = Engine::camera_pool()?;
/// let main = pool.create_camera("main", CameraDesc::default())?;
///
/// Engine::shutdown();
/// ```
pub struct Engine;

impl Engine {
    fn not_initialized() -> Error {
        crate::engine_err!(
            "galaxy3d::Engine",
            InitializationFailed,
            "Engine not initialized. Call Engine::initialize() first."
        )
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(Self::not_initialized)
    }

    /// Initialize the engine
    ///
    /// Idempotent. Must be called before any subsystem is created.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and drop every singleton
    ///
    /// The camera pool is released before the graphics device since camera
    /// resources were allocated from it.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut pool) = state.camera_pool.write() {
                *pool = None;
            }
            if let Ok(mut device) = state.graphics_device.write() {
                *device = None;
            }
        }
    }

    // ===== GRAPHICS DEVICE API =====

    /// Wrap a backend device and register it as the graphics device singleton
    ///
    /// # Errors
    ///
    /// - The engine is not initialized
    /// - A graphics device already exists
    pub fn create_graphics_device<D: GraphicsDevice + 'static>(device: D) -> Result<()> {
        let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
        Self::register_graphics_device(device)?;

        crate::engine_info!("galaxy3d::Engine", "Graphics device singleton created successfully");
        Ok(())
    }

    /// Register an already shared graphics device
    pub fn register_graphics_device(device: Arc<Mutex<dyn GraphicsDevice>>) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.graphics_device.write()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "GraphicsDevice lock poisoned"))?;

        if lock.is_some() {
            crate::engine_bail!(
                "galaxy3d::Engine",
                InitializationFailed,
                "GraphicsDevice already exists. Call Engine::destroy_graphics_device() first."
            );
        }

        *lock = Some(device);
        Ok(())
    }

    /// Get the graphics device singleton
    ///
    /// # Errors
    ///
    /// - The engine is not initialized
    /// - No graphics device has been created
    pub fn graphics_device() -> Result<Arc<Mutex<dyn GraphicsDevice>>> {
        let state = Self::state()?;

        let lock = state.graphics_device.read()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "GraphicsDevice lock poisoned"))?;

        lock.clone().ok_or_else(|| crate::engine_err!(
            "galaxy3d::Engine",
            InitializationFailed,
            "GraphicsDevice not created. Call Engine::create_graphics_device() first."
        ))
    }

    /// Drop the graphics device singleton
    ///
    /// Outstanding `Arc`s (the camera pool holds one) stay valid until dropped.
    pub fn destroy_graphics_device() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.graphics_device.write()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "GraphicsDevice lock poisoned"))?;
        *lock = None;

        crate::engine_info!("galaxy3d::Engine", "Graphics device singleton destroyed");
        Ok(())
    }

    // ===== CAMERA POOL API =====

    /// Create the camera pool singleton on top of the registered graphics device
    ///
    /// # Errors
    ///
    /// - The engine is not initialized
    /// - No graphics device has been created
    /// - A camera pool already exists
    /// - `desc` is invalid, or the upload buffers cannot be allocated
    pub fn create_camera_pool(desc: CameraPoolDesc) -> Result<()> {
        let state = Self::state()?;
        let device = Self::graphics_device()?;

        let mut lock = state.camera_pool.write()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "CameraPool lock poisoned"))?;

        if lock.is_some() {
            crate::engine_bail!(
                "galaxy3d::Engine",
                InitializationFailed,
                "CameraPool already exists. Call Engine::destroy_camera_pool() first."
            );
        }

        let capacity = desc.capacity;
        *lock = Some(Arc::new(CameraPool::new(device, desc)?));

        crate::engine_info!("galaxy3d::Engine", "CameraPool singleton created (capacity {})", capacity);
        Ok(())
    }

    /// Get the camera pool singleton
    pub fn camera_pool() -> Result<Arc<CameraPool>> {
        let state = Self::state()?;

        let lock = state.camera_pool.read()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "CameraPool lock poisoned"))?;

        lock.clone().ok_or_else(|| crate::engine_err!(
            "galaxy3d::Engine",
            InitializationFailed,
            "CameraPool not created. Call Engine::create_camera_pool() first."
        ))
    }

    /// Drop the camera pool singleton
    pub fn destroy_camera_pool() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.camera_pool.write()
            .map_err(|_| crate::engine_err!("galaxy3d::Engine", BackendError, "CameraPool lock poisoned"))?;
        *lock = None;

        crate::engine_info!("galaxy3d::Engine", "CameraPool singleton destroyed");
        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        Self::shutdown();
    }

    // ===== LOGGING API =====

    /// Replace the global logger
    ///
    /// ```ignore
    /// use galaxy_3d_camera::galaxy3d::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) { /* append to file */ }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the default console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Emit an entry without source location (engine_trace! .. engine_warn!)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_slot().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Emit an entry with file:line (engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_slot().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
