use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::FutureExt;
use futures::future::BoxFuture;
use mime::Mime;

use crate::error::AbsensiError;
use crate::store::{FileStore, Row, SheetStore, Stores};

#[derive(Default)]
pub struct MockFileStore {
    pub objects: RwLock<HashMap<String, Vec<u8>>>,
    pub fail_create: bool,
}

impl FileStore for MockFileStore {
    fn create(
        &self,
        name: String,
        bytes: Vec<u8>,
        _mime_type: Mime,
    ) -> BoxFuture<'_, Result<String, AbsensiError>> {
        async move {
            if self.fail_create {
                return Err(AbsensiError::Upload {
                    source: "mock file store offline".into(),
                });
            }

            let mut objects = self.objects.write().unwrap();
            let object_id = format!("obj-{}-{}", objects.len() + 1, name);
            objects.insert(object_id.clone(), bytes);

            Ok(object_id)
        }
        .boxed()
    }

    fn view_link(&self, object_id: &str) -> String {
        format!("https://files.example/file/d/{object_id}/view?usp=sharing")
    }
}

#[derive(Default)]
pub struct MockSheetStore {
    pub appended: RwLock<Vec<Row>>,
    pub fail_append: bool,
}

impl SheetStore for MockSheetStore {
    fn append(&self, row: Row) -> BoxFuture<'_, Result<(), AbsensiError>> {
        async move {
            if self.fail_append {
                return Err(AbsensiError::Append {
                    source: "mock sheet offline".into(),
                });
            }

            self.appended.write().unwrap().push(row);
            Ok(())
        }
        .boxed()
    }

    fn rows(&self) -> BoxFuture<'_, Result<Vec<Vec<String>>, AbsensiError>> {
        async move {
            Ok(self
                .appended
                .read()
                .unwrap()
                .iter()
                .map(|row| row.to_vec())
                .collect())
        }
        .boxed()
    }
}

/// Fresh mock pair, handles kept for inspection after the call under test.
pub fn mock_stores() -> (Stores, Arc<MockFileStore>, Arc<MockSheetStore>) {
    let files = Arc::new(MockFileStore::default());
    let sheet = Arc::new(MockSheetStore::default());

    let stores = Stores {
        files: files.clone(),
        sheet: sheet.clone(),
    };

    (stores, files, sheet)
}
