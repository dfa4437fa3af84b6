//! 文档存储操作
//!
//! 读改写在事务内先取得目标行的写锁再读取，`version` 列作为最后一道校验。

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::SeaOrmBackend;
use crate::entity::documents::Column;
use crate::entity::prelude::{DocumentActiveModel, DocumentModel, Documents};
use crate::errors::{AttendlyError, Result};
use crate::storage::document::{
    self, ArrayMutation, Collection, Document, DocumentData, FieldFilter, MAX_BATCH_SIZE,
    millis_to_datetime, monotonic_now_millis,
};
use crate::storage::{BackendKind, DocumentBackend};

/// 写入的最大尝试次数
const MAX_WRITE_ATTEMPTS: u32 = 8;

/// 单次读改写的结果
enum WriteOutcome {
    Missing,
    Written(bool, Document),
    Conflict,
}

impl SeaOrmBackend {
    async fn find_model<C: ConnectionTrait>(
        conn: &C,
        collection: Collection,
        id: &str,
    ) -> Result<Option<DocumentModel>> {
        Documents::find_by_id((collection.as_str().to_string(), id.to_string()))
            .one(conn)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("查询文档失败: {e}")))
    }

    /// 读改写一个文档，`mutate` 返回 false 表示无需写入
    ///
    /// 每次尝试在一个事务内完成：先对目标行做一次空更新取得写锁
    /// （SQLite 为数据库写锁，PostgreSQL/MySQL 为行锁），其余写入者在锁上排队，
    /// 之后的读取一定能看到上一个写入者提交的内容。
    async fn mutate_impl<F>(
        &self,
        collection: Collection,
        id: &str,
        mutate: F,
    ) -> Result<Option<(bool, Document)>>
    where
        F: Fn(&mut DocumentData) -> bool + Send + Sync,
    {
        for attempt in 0..MAX_WRITE_ATTEMPTS {
            match self.mutate_locked(collection, id, &mutate).await? {
                WriteOutcome::Missing => return Ok(None),
                WriteOutcome::Written(changed, doc) => return Ok(Some((changed, doc))),
                WriteOutcome::Conflict => {
                    let delay = rand::rng().random_range(1..=(4u64 << attempt.min(6)));
                    debug!(
                        "Write conflict on {}/{} (attempt {}), retrying in {} ms",
                        collection,
                        id,
                        attempt + 1,
                        delay
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
            }
        }

        Err(AttendlyError::backend_operation(format!(
            "文档 {collection}/{id} 写入冲突次数过多"
        )))
    }

    async fn mutate_locked<F>(
        &self,
        collection: Collection,
        id: &str,
        mutate: &F,
    ) -> Result<WriteOutcome>
    where
        F: Fn(&mut DocumentData) -> bool + Send + Sync,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("开启事务失败: {e}")))?;

        Documents::update_many()
            .col_expr(Column::Version, Expr::col(Column::Version))
            .filter(Column::Collection.eq(collection.as_str()))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("锁定文档失败: {e}")))?;

        let Some(current) = Self::find_model(&txn, collection, id).await? else {
            Self::rollback(txn).await?;
            return Ok(WriteOutcome::Missing);
        };

        let mut data: DocumentData = serde_json::from_str(&current.data)?;
        if !mutate(&mut data) {
            Self::rollback(txn).await?;
            return Ok(WriteOutcome::Written(false, current.into_document()?));
        }

        let now = monotonic_now_millis();
        let result = Documents::update_many()
            .col_expr(Column::Data, Expr::value(serde_json::to_string(&data)?))
            .col_expr(Column::Version, Expr::value(current.version + 1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Collection.eq(collection.as_str()))
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(current.version))
            .exec(&txn)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("更新文档失败: {e}")))?;

        if result.rows_affected != 1 {
            Self::rollback(txn).await?;
            return Ok(WriteOutcome::Conflict);
        }

        txn.commit()
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("提交事务失败: {e}")))?;

        Ok(WriteOutcome::Written(
            true,
            Document {
                id: current.id,
                data,
                created_at: millis_to_datetime(current.created_at),
                updated_at: millis_to_datetime(now),
            },
        ))
    }

    async fn rollback(txn: DatabaseTransaction) -> Result<()> {
        txn.rollback()
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("回滚事务失败: {e}")))
    }

    async fn insert_with_id(
        &self,
        collection: Collection,
        id: String,
        data: DocumentData,
    ) -> Result<Document> {
        let now = monotonic_now_millis();
        let mut body = DocumentData::new();
        document::merge_data(&mut body, data);

        let model = DocumentActiveModel {
            collection: Set(collection.as_str().to_string()),
            id: Set(id),
            data: Set(serde_json::to_string(&body)?),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("创建文档失败: {e}")))?;

        result.into_document()
    }
}

#[async_trait]
impl DocumentBackend for SeaOrmBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        Self::find_model(&self.db, collection, id)
            .await?
            .map(DocumentModel::into_document)
            .transpose()
    }

    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Option<Document>>> {
        if ids.len() > MAX_BATCH_SIZE {
            return Err(AttendlyError::backend_operation(format!(
                "batch read of {} documents exceeds the limit of {MAX_BATCH_SIZE}",
                ids.len()
            )));
        }

        let models = Documents::find()
            .filter(Column::Collection.eq(collection.as_str()))
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("批量查询文档失败: {e}")))?;

        let mut by_id: HashMap<String, Document> = HashMap::with_capacity(models.len());
        for model in models {
            let doc = model.into_document()?;
            by_id.insert(doc.id.clone(), doc);
        }

        Ok(ids.iter().map(|id| by_id.get(id).cloned()).collect())
    }

    async fn find(&self, collection: Collection, filter: &FieldFilter) -> Result<Vec<Document>> {
        // 文档字段未建索引，按集合全量读取后在内存中过滤
        let models = Documents::find()
            .filter(Column::Collection.eq(collection.as_str()))
            .all(&self.db)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("查询集合失败: {e}")))?;

        let mut documents = Vec::new();
        for model in models {
            let doc = model.into_document()?;
            if filter.matches(&doc.data) {
                documents.push(doc);
            }
        }
        Ok(documents)
    }

    async fn insert(&self, collection: Collection, data: DocumentData) -> Result<Document> {
        self.insert_with_id(collection, Uuid::new_v4().to_string(), data)
            .await
    }

    async fn set_merge(
        &self,
        collection: Collection,
        id: &str,
        data: DocumentData,
    ) -> Result<Document> {
        let merge = |target: &mut DocumentData| {
            document::merge_data(target, data.clone());
            true
        };

        if let Some((_, doc)) = self.mutate_impl(collection, id, merge).await? {
            return Ok(doc);
        }

        match self
            .insert_with_id(collection, id.to_string(), data.clone())
            .await
        {
            Ok(doc) => Ok(doc),
            Err(insert_err) => {
                // 并发创建同一文档时主键冲突，改为合并写入
                debug!("Insert of {}/{} failed: {}", collection, id, insert_err);
                self.mutate_impl(collection, id, merge)
                    .await?
                    .map(|(_, doc)| doc)
                    .ok_or(insert_err)
            }
        }
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<Option<Document>> {
        Ok(self
            .mutate_impl(collection, id, |data| {
                document::merge_data(data, patch.clone());
                true
            })
            .await?
            .map(|(_, doc)| doc))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let result = Documents::delete_by_id((collection.as_str().to_string(), id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AttendlyError::backend_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        Ok(self
            .mutate_impl(collection, id, |data| {
                document::array_union(data, field, &value)
            })
            .await?
            .map(|(changed, document)| ArrayMutation { changed, document }))
    }

    async fn array_remove(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        Ok(self
            .mutate_impl(collection, id, |data| {
                document::array_remove(data, field, &value)
            })
            .await?
            .map(|(changed, document)| ArrayMutation { changed, document }))
    }
}
